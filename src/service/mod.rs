pub mod risk_service;

pub use risk_service::RiskService;
