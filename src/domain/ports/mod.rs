mod image_probe_port;
mod key_value_store_port;
mod product_source_port;

pub use image_probe_port::{ImageProbePort, ProbeResponse};
pub use key_value_store_port::KeyValueStorePort;
pub use product_source_port::ProductSourcePort;

#[cfg(test)]
pub mod mocks {
    pub use super::image_probe_port::mock::MockImageProbe;
    pub use super::product_source_port::mock::{MockListing, MockProductSource};
}
