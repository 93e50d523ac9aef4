use clap::Parser;
use random_node::adapters::parse_items;
use random_node::core::NodeType;
use random_node::utils::{logger, validation::Validate};
use random_node::{CliConfig, Item, LocalExecutionContext, NodeEngine, RandomNode, ReqwestHttpClient};
use serde_json::Map;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.describe {
        let description = RandomNode::new().description();
        println!("{}", serde_json::to_string_pretty(&description)?);
        return Ok(());
    }

    tracing::info!("Starting random-node");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let items = match &cli.input {
        Some(path) => {
            tracing::info!("📁 Loading input records from: {}", path);
            parse_items(&tokio::fs::read_to_string(path).await?)?
        }
        None => vec![Item::new(Map::new())],
    };

    let ctx = LocalExecutionContext::new(items, ReqwestHttpClient::new())
        .with_parameters(config.parameter_map()?)
        .with_continue_on_fail(config.execution.continue_on_fail)
        .with_node_name(config.node.name.clone());

    let engine = NodeEngine::new(config.build_node());

    match engine.run(&ctx).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Err(e) => {
            eprintln!("❌ {}: {}", e.node, e);
            std::process::exit(1);
        }
    }

    Ok(())
}
