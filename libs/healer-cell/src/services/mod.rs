pub mod healer;

pub use healer::HealerService;
