use std::net::IpAddr;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use log::{error, info, warn};
use parking_lot::deadlock;
use tokio::runtime::Builder;
use tokio_shutdown::Shutdown;
use nodemesh::cluster::structs::cluster_controller::ClusterController;
use nodemesh::common::common::setup_logging;
use nodemesh::config::structs::configuration::Configuration;
use nodemesh::structs::Cli;

fn main() -> std::io::Result<()>
{
    let args = Cli::parse();

    let config = match Configuration::load_from_file(args.create_config) {
        Ok(config) => Arc::new(config),
        Err(_) => exit(101)
    };

    setup_logging(&config);

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let tokio_shutdown = Shutdown::new().expect("shutdown creation works on first call");

            let deadlocks_handler = tokio_shutdown.clone();
            tokio::spawn(async move {
                info!("[BOOT] Starting thread for deadlocks...");
                let mut interval = tokio::time::interval(Duration::from_secs(30));
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let deadlocks = deadlock::check_deadlock();
                            if !deadlocks.is_empty() {
                                info!("[DEADLOCK] Found {} deadlocks", deadlocks.len());
                                for (i, threads) in deadlocks.iter().enumerate() {
                                    info!("[DEADLOCK] #{i}");
                                    for t in threads {
                                        info!("[DEADLOCK] Thread ID: {:#?}", t.thread_id());
                                        info!("[DEADLOCK] {:#?}", t.backtrace());
                                    }
                                }
                            }
                        }
                        _ = deadlocks_handler.handle() => {
                            info!("[BOOT] Shutting down thread for deadlocks...");
                            return;
                        }
                    }
                }
            });

            let controller = Arc::new(ClusterController::new(config.clone()));

            if config.cluster.enabled {
                if let Err(error) = controller.startup() {
                    error!("[BOOT] Unable to start the cluster controller: {}", error);
                    exit(1);
                }

                let mut seeds: Vec<IpAddr> = Vec::new();
                for seed in config.cluster.seeds.iter().chain(args.seed.iter()) {
                    match seed.parse::<IpAddr>() {
                        Ok(address) => { seeds.push(address); }
                        Err(_) => { warn!("[BOOT] Ignoring invalid seed address: {}", seed); }
                    }
                }
                controller.add_cluster_address(seeds);

                info!("[BOOT] Node {} is up on cluster port {}", controller.tag(), controller.port());
            } else {
                warn!("[BOOT] Cluster discovery is disabled in the configuration.");
            }

            tokio_shutdown.handle().await;

            info!("[BOOT] Shutting down...");
            controller.shutdown();
            info!("[BOOT] Shutdown complete.");
        });

    Ok(())
}
