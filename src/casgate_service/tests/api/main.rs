mod force_login;
mod helpers;
mod login;
mod logout;
mod logout_script;
mod single_logout;
mod validate;
