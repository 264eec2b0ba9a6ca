pub mod error;
pub mod artifact;
pub mod linker;
pub mod chain;
pub mod contracts;
pub mod deployer;
pub mod codec;
pub mod notional;
pub mod config;

pub use artifact::CompiledArtifact;
pub use chain::{ChainClient, CreationReceipt, DeployEnvironment};
pub use config::{AddressBook, DeployConfig};
pub use deployer::{ContractHandle, coerce_constructor_args, deploy_artifact, deploy_compiled};
pub use error::VaultToolsError;
pub use linker::{LibraryTable, find_placeholders, link_bytecode};
pub use notional::{EncodedTransaction, NotionalClient};
