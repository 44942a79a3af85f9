/// Settings for verifying the bearer tokens issued by the identity provider.
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
}

impl AuthConfig {
    /// Environment variables:
    /// - JWT_SECRET: HS256 signing secret shared with the identity provider (required)
    /// - JWT_ISSUER: Expected `iss` claim; not checked when unset
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        Ok(Self {
            jwt_secret,
            issuer: std::env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty()),
        })
    }
}
