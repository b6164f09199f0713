pub mod app;
pub mod controller;
pub mod storage;
pub mod store;
pub mod surfaces;
pub mod validator;
