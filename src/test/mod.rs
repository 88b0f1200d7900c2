mod factories;

pub use factories::*;
pub use privileges::CountingPrivileges;
