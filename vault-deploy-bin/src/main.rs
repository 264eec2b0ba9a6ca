use vault_runtime::{
    ChainClient, CompiledArtifact, DeployConfig, VaultToolsError, coerce_constructor_args,
    deploy_compiled,
};

fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    if tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {}
}

#[tokio::main]
async fn main() -> Result<(), VaultToolsError> {
    dotenvy::dotenv().ok();
    setup_log();

    let config = DeployConfig::from_env()?;
    tracing::info!(
        rpc_url = %config.rpc_url,
        chain_id = config.chain_id,
        artifact = %config.artifact_path.display(),
        libraries = config.libraries.len(),
        "Starting vault deployment"
    );

    let client = ChainClient::new(&config.rpc_url, &config.private_key, config.chain_id)?;
    let artifact = CompiledArtifact::load(&config.artifact_path)?;
    let args = coerce_constructor_args(&artifact.abi, &config.constructor_args)?;

    let handle = deploy_compiled(
        &client,
        &artifact,
        &args,
        client.address(),
        &config.contract_name,
        &config.libraries,
    )
    .await?;

    let report = serde_json::json!({
        "contract": handle.name,
        "address": handle.address.to_string(),
        "deployer": handle.owner.to_string(),
        "chainId": config.chain_id,
        "libraries": config
            .libraries
            .iter()
            .map(|(name, address)| (name.to_string(), serde_json::Value::from(address)))
            .collect::<serde_json::Map<_, _>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
