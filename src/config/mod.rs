//! Configuration module

mod site;

pub use site::AnchorConfig;
pub use site::KatexConfig;
pub use site::SiteConfig;
pub use site::TorchlightConfig;
