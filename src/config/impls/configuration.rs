use std::fs::File;
use std::io::Write;
use crate::common::structs::custom_error::CustomError;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::cluster_config::ClusterConfig;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::network_config::NetworkConfig;

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            network: NetworkConfig {
                connect_timeout: 10000,
                buffer_size: 8192,
                head_mark: Some(String::from("aa")),
                tail_mark: Some(String::from("bb")),
            },
            cluster: ClusterConfig {
                enabled: true,
                bind_address: String::from("0.0.0.0"),
                preferred_port: 7110,
                port_range: 4,
                auto_scan: true,
                initial_delay: 10,
                scan_interval: 300,
                seeds: vec![]
            }
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => {
                match Self::load(data.as_slice()) {
                    Ok(cfg) => {
                        Ok(cfg)
                    }
                    Err(e) => Err(ConfigurationError::ParseError(e)),
                }
            }
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => {
                match file.write_all(data.as_ref()) {
                    Ok(_) => Ok(()),
                    Err(e) => Err(ConfigurationError::IOError(e))
                }
            }
            Err(e) => Err(ConfigurationError::IOError(e))
        }
    }

    pub fn load_from_file(create: bool) -> Result<Configuration, CustomError> {
        let mut config = Configuration::init();
        match Configuration::load_file("config.toml") {
            Ok(c) => { config = c; }
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {}", error);

                if !create {
                    eprintln!("You can either create your own config.toml file, or start this app using '--create-config' as parameter.");
                    return Err(CustomError::new("will not create automatically config.toml file"));
                }
                eprintln!("Creating config file..");

                let config_toml = toml::to_string(&config).unwrap();
                let save_file = Configuration::save_file("config.toml", config_toml);
                return match save_file {
                    Ok(_) => {
                        eprintln!("Please edit the config.TOML in the root folder, exiting now...");
                        Err(CustomError::new("create config.toml file"))
                    }
                    Err(e) => {
                        eprintln!("config.toml file could not be created, check permissions...");
                        eprintln!("{e}");
                        Err(CustomError::new("could not create config.toml file"))
                    }
                };
            }
        };

        if let Err(error) = config.validate() {
            eprintln!("[VALIDATE] {}", error);
            return Err(error);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CustomError> {
        if self.network.head_mark.is_some() != self.network.tail_mark.is_some() {
            return Err(CustomError::new("head_mark and tail_mark must be set together"));
        }
        if let Err(error) = self.network.head_mark_bytes() {
            return Err(error);
        }
        if let Err(error) = self.network.tail_mark_bytes() {
            return Err(error);
        }
        if self.network.buffer_size == 0 {
            return Err(CustomError::new("buffer_size must be non-zero"));
        }
        if self.cluster.port_range == 0 {
            return Err(CustomError::new("port_range must be at least 1"));
        }
        Ok(())
    }
}
