pub mod domain;
pub mod dto;
pub mod factory;
pub mod gateway;
pub mod controller;

pub mod command {
    pub mod pay_fees_cmd;
    pub mod refund_fee_cmd;
    pub mod verify_payment_cmd;
}
