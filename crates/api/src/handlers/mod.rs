pub mod alert;
pub mod teleport;
