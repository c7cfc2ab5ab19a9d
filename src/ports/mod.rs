mod gateway;

pub use gateway::LicensingGateway;
