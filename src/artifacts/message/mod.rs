pub mod conventional;
pub mod validator;
