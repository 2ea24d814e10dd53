mod service_container;

pub use service_container::ServiceContainer;
