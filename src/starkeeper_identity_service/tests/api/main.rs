mod authorize;
mod helpers;
mod registration;
