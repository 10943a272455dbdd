//! Chainlink Functions CLI
//!
//! ```text
//!   deploy-record-label ──▶ RecordLabel consumer on the configured network
//!
//!   execute-request ──▶ preflight (subscription, cost, confirmation)
//!                   ──▶ secrets (gist upload + DON encryption)
//!                   ──▶ sendRequest ──▶ request id
//!
//!   read-response   ──▶ latestError / latestResponse ──▶ decoded value
//!   delete-gist     ──▶ remove hosted encrypted secrets
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use functions_client::blockchain::types::parse_address;
use functions_client::blockchain::{
    deploy_record_label, ChainClient, ContractArtifact, RecordLabelConsumer, TxOverrides, Wallet,
};
use functions_client::config::env::GITHUB_API_TOKEN_ENV_VAR;
use functions_client::config::{load_config, ClientConfig, Environment, NetworkConfig};
use functions_client::fulfillment::{Fulfillment, FulfillmentReader};
use functions_client::observability;
use functions_client::request::{
    execute_request, AlwaysConfirm, Confirmation, ConsolePrompt, ExecutionOutcome, RequestConfig,
    RequestSubmitter, SubmitParams,
};
use functions_client::secrets::{
    DonSecretsEncryptor, GistClient, GistStore, SecretsReferenceResolver,
};
use functions_client::subscription::RouterSubscriptions;
use functions_client::{FunctionsError, FunctionsResult};

#[derive(Parser)]
#[command(name = "functions-cli")]
#[command(about = "Send Chainlink Functions requests and read their results", long_about = None)]
struct Cli {
    /// Client configuration file
    #[arg(short, long, default_value = "functions.toml")]
    config: PathBuf,

    /// Network name from the configuration (defaults to `default_network`)
    #[arg(short, long)]
    network: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the RecordLabel consumer contract
    DeployRecordLabel {
        /// Address of the stable coin contract paid out by RecordLabel
        #[arg(long)]
        stc_contract: String,
        /// Compiled contract artifact (JSON with a `bytecode` field)
        #[arg(long, default_value = "build/artifacts/contracts/RecordLabel.sol/RecordLabel.json")]
        artifact: PathBuf,
    },
    /// Send a Functions request through a consumer contract
    ExecuteRequest {
        /// Address of the consumer contract
        #[arg(long)]
        contract: String,
        /// Billing subscription ID
        #[arg(long)]
        subid: u64,
        /// Maximum gas the fulfillment callback may use
        #[arg(long)]
        callback_gas_limit: Option<u32>,
        /// Manual gas limit for the request transaction
        #[arg(long)]
        request_gas_limit: Option<u64>,
        /// Request config file
        #[arg(long)]
        request_config: Option<PathBuf>,
        /// Locally encrypted secrets bundle
        #[arg(long)]
        secrets_path: Option<PathBuf>,
        /// Skip the cost confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a gist holding encrypted secrets
    DeleteGist {
        #[arg(long)]
        gist_url: String,
    },
    /// Read and decode the last response stored by a consumer contract
    ReadResponse {
        #[arg(long)]
        contract: String,
        /// Request config file, for the expected return type
        #[arg(long)]
        request_config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = load_config(&cli.config);
    let log_level = config
        .as_ref()
        .map(|c| c.observability.log_level.as_str())
        .unwrap_or("info");
    observability::init(log_level);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let env = Environment::capture();

    match run(cli.command, cli.network.as_deref(), &config, &env).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(
    command: Commands,
    network: Option<&str>,
    config: &ClientConfig,
    env: &Environment,
) -> FunctionsResult<()> {
    match command {
        Commands::DeployRecordLabel {
            stc_contract,
            artifact,
        } => {
            let (name, network) = select_network(config, network)?;
            let stable_coin = parse_address("stable coin address", &stc_contract)?;
            let artifact = ContractArtifact::load(&artifact)?;
            let wallet = Wallet::from_credentials(&env.credentials())?;
            let client = ChainClient::connect(name, network.clone(), Some(&wallet)).await?;

            println!("Deploying RecordLabel contract to {}", name);
            let deployment = deploy_record_label(&client, &artifact, stable_coin).await?;
            print_transaction(network, &deployment.transaction_hash.to_string());
            println!(
                "RecordLabel contract deployed to {} on {}",
                deployment.address, name
            );
        }
        Commands::ExecuteRequest {
            contract,
            subid,
            callback_gas_limit,
            request_gas_limit,
            request_config,
            secrets_path,
            yes,
        } => {
            let (name, network) = select_network(config, network)?;
            let consumer_address = parse_address("consumer contract address", &contract)?;
            let request_config = request_config
                .unwrap_or_else(|| PathBuf::from(&config.request.request_config_path));
            let secrets_path = secrets_path
                .unwrap_or_else(|| PathBuf::from(&config.request.encrypted_secrets_path));
            let request = RequestConfig::load(&request_config, env)?;

            let credentials = env.credentials();
            let wallet = Wallet::from_credentials(&credentials)?;
            let client = ChainClient::connect(name, network.clone(), Some(&wallet)).await?;
            let subscriptions = RouterSubscriptions::from_network(client.clone())?;

            let gists = credentials
                .github_api_token
                .as_deref()
                .map(|token| GistClient::new(&config.gist, token))
                .transpose()?;
            let encryptor = DonSecretsEncryptor::new(
                client.clone(),
                subscriptions.clone(),
                network.don_id.clone(),
            );
            let resolver = SecretsReferenceResolver::new(gists, encryptor);

            let params = SubmitParams {
                consumer: consumer_address,
                subscription_id: subid,
                callback_gas_limit: callback_gas_limit.unwrap_or(config.request.callback_gas_limit),
                don_id: network.don_id.clone(),
                overrides: TxOverrides::from_network(network).with_gas_limit(
                    request_gas_limit.unwrap_or(config.request.request_gas_limit),
                ),
            };
            let consumer = RecordLabelConsumer::new(client.clone(), consumer_address);

            let outcome = if yes {
                let submitter =
                    RequestSubmitter::new(subscriptions, consumer, client, AlwaysConfirm, params);
                submit(&submitter, &resolver, &request, &secrets_path).await?
            } else {
                let submitter =
                    RequestSubmitter::new(subscriptions, consumer, client, ConsolePrompt, params);
                submit(&submitter, &resolver, &request, &secrets_path).await?
            };

            print_transaction(network, &outcome.receipt.transaction_hash.to_string());
            println!("Functions request ID: {}", outcome.receipt.request_id);
            if let Some(gist_url) = &outcome.gist_url {
                println!(
                    "Encrypted secrets are hosted at {}\nDelete them once the request is fulfilled: functions-cli delete-gist --gist-url {}",
                    gist_url, gist_url
                );
            }
            println!(
                "Read the result with: functions-cli read-response --contract {}",
                consumer_address
            );
        }
        Commands::DeleteGist { gist_url } => {
            let token = env
                .credentials()
                .github_api_token
                .ok_or(FunctionsError::MissingCredential(GITHUB_API_TOKEN_ENV_VAR))?;
            let gists = GistClient::new(&config.gist, &token)?;
            if gists.delete_gist(&gist_url).await? {
                println!("Deleted gist {}", gist_url);
            } else {
                println!(
                    "Gist {} was not deleted. Check that the token owns it and delete it manually if needed.",
                    gist_url
                );
            }
        }
        Commands::ReadResponse {
            contract,
            request_config,
        } => {
            let (name, network) = select_network(config, network)?;
            let consumer_address = parse_address("consumer contract address", &contract)?;
            let request_config = request_config
                .unwrap_or_else(|| PathBuf::from(&config.request.request_config_path));
            let request = RequestConfig::load(&request_config, env)?;

            let client = ChainClient::connect(name, network.clone(), None).await?;
            let reader = FulfillmentReader::new(
                RecordLabelConsumer::new(client, consumer_address),
                request.expected_return_type,
            );

            match reader.read().await? {
                Fulfillment::Pending => {
                    println!("No response or error stored yet for {}", consumer_address)
                }
                Fulfillment::Fulfilled { raw, value } => {
                    println!("Response returned to client contract as a hex string: {}", raw);
                    println!(
                        "Decoded response to a {}: {}",
                        request.expected_return_type, value
                    );
                }
                Fulfillment::Failed(message) => {
                    println!("Error returned to client contract: {}", message)
                }
            }
        }
    }
    Ok(())
}

fn select_network<'a>(
    config: &'a ClientConfig,
    name: Option<&str>,
) -> FunctionsResult<(&'a str, &'a NetworkConfig)> {
    config.network(name).ok_or_else(|| {
        FunctionsError::Config(match name.or(config.default_network.as_deref()) {
            Some(name) => format!("network '{}' is not configured", name),
            None => "no --network given and no default_network configured".to_string(),
        })
    })
}

async fn submit<P: Confirmation>(
    submitter: &RequestSubmitter<RouterSubscriptions, RecordLabelConsumer, ChainClient, P>,
    resolver: &SecretsReferenceResolver<GistClient, DonSecretsEncryptor>,
    request: &RequestConfig,
    secrets_path: &Path,
) -> FunctionsResult<ExecutionOutcome> {
    execute_request(submitter, resolver, request, || {
        std::fs::read_to_string(secrets_path).map_err(|e| {
            FunctionsError::Config(format!(
                "cannot read encrypted secrets {}: {}",
                secrets_path.display(),
                e
            ))
        })
    })
    .await
}

fn print_transaction(network: &NetworkConfig, tx_hash: &str) {
    match network.explorer_tx_url(tx_hash) {
        Some(url) => println!("Transaction confirmed: {}", url),
        None => println!("Transaction confirmed: {}", tx_hash),
    }
}
