pub mod date;
pub mod locks;
pub mod logs;
pub mod memory;
pub mod validation;
