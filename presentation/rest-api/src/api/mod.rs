pub mod cart {
    pub mod dto;
    pub mod error_mapper;
    pub mod payload;
    pub mod routes;
}
pub mod error;
pub mod health {
    pub mod routes;
}
pub mod security;
pub mod tags;
