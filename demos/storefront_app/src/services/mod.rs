// demos/storefront_app/src/services/mod.rs
pub mod panier_outbox;

pub use panier_outbox::OutboxGateway;
