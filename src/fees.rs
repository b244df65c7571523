pub mod domain;
pub mod dto;
pub mod factory;
pub mod controller;

pub mod command {
    pub mod calculate_fee_cmd;
}
