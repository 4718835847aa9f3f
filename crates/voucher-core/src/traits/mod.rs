//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CustomerRepository, EventRepository, QrRepository, ReleaseRepository, RepoResult,
    StorageHealth, VoucherRepository,
};
