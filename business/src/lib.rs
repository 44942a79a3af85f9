pub mod application {
    pub mod cart {
        pub mod add_item;
        pub mod get_contents;
        pub mod remove_item;
        pub mod update_item;

        #[cfg(test)]
        mod in_memory;
        #[cfg(test)]
        mod scenarios;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod catalog {
        pub mod model;
        pub mod repository;
    }
    pub mod cart {
        pub mod errors;
        pub mod model;
        pub mod store;
        pub mod value_objects;
        pub mod use_cases {
            pub mod add_item;
            pub mod get_contents;
            pub mod remove_item;
            pub mod update_item;
        }
    }
}
