pub mod env {
    pub const CONFIG_PATH_ENV_VAR: &str = "STARKEEPER_CONFIG";
    pub const ENV_PREFIX: &str = "STARKEEPER";
}

pub mod defaults {
    pub const CONFIG_PATH: &str = "config/settings.json";
    pub const APPLICATION_NAME: &str = "Starkeeper";
    pub const APP_ADDRESS: &str = "0.0.0.0:5056";
    pub const SUBJECT_HEADER: &str = "x-authenticated-subject";
    pub const CLIENT_ID: &str = "service-worker";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
