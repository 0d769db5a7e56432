mod cli;

use anyhow::{bail, Context, Result};
use camview::prelude::*;
use clap::Parser;
use cli::{Cli, Command, SdCommand, WifiCommand};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = DeviceConfig::new(cli.url.clone());
    config.timeout_ms = cli.timeout_ms;
    let mut client = DeviceClient::new(config).context("invalid device settings")?;

    if let (Some(user), Some(password)) = (&cli.user, &cli.password) {
        client
            .login(Credentials::new(user.clone(), password.clone()))
            .await
            .context("login failed")?;
    }

    match cli.command {
        Command::Status => {
            let status = client.status().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
        Command::Watch(args) => {
            let period = Duration::from_millis(args.interval_ms.max(100));
            let poll = client.poll_status(period, |update| {
                match update {
                    Ok(status) => print_status(&status),
                    Err(ViewerError::Unauthorized) => {
                        eprintln!("Device rejected the credentials");
                        return false;
                    }
                    Err(e) => println!("Offline ({})", e),
                }
                true
            });
            tokio::select! {
                _ = poll => {}
                _ = tokio::signal::ctrl_c() => log::info!("interrupted"),
            }
        }
        Command::Sd { command } => match command {
            SdCommand::List => {
                let files = client.sd_files().await?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&files)?);
                    return Ok(());
                }
                if files.is_empty() {
                    println!("No recordings on the SD card.");
                    return Ok(());
                }
                println!("{:<32}  {:>12}  DOWNLOAD", "NAME", "SIZE");
                for file in &files {
                    println!(
                        "{:<32}  {:>12}  {}",
                        file.name,
                        file.size_label(),
                        client.sd_download_url(&file.name)?
                    );
                }
            }
            SdCommand::Delete { file } => {
                client.delete_sd_file(&file).await?;
                println!("Deleted {}", file);
            }
        },
        Command::Wifi { command } => match command {
            WifiCommand::Scan => {
                let scan = client.wifi_scan().await?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&scan)?);
                    return Ok(());
                }
                if scan.networks.is_empty() {
                    println!("No networks found");
                    return Ok(());
                }
                println!("Found {} networks", scan.networks.len());
                println!("{:<32}  {:>6}  SECURED", "SSID", "SIGNAL");
                for network in &scan.networks {
                    println!(
                        "{:<32}  {:>5}%  {}",
                        network.ssid,
                        network.signal_percent(),
                        if network.is_secured() { "yes" } else { "no" }
                    );
                }
            }
            WifiCommand::Status => {
                let status = client.wifi_status().await?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&status)?);
                    return Ok(());
                }
                println!(
                    "Wi-Fi: {}",
                    if status.connected { "Connected" } else { "Disconnected" }
                );
                println!("SSID:  {}", status.ssid.as_deref().unwrap_or("-"));
                println!("IP:    {}", status.ip.as_deref().unwrap_or("-"));
            }
            WifiCommand::Connect { ssid, password } => {
                let reply = client.wifi_connect(&ssid, &password).await?;
                if !reply.success {
                    bail!(
                        "failed to connect: {}",
                        reply.message.as_deref().unwrap_or("unknown error")
                    );
                }
                println!(
                    "Connecting to {}. The device will restart if the connection succeeds.",
                    ssid
                );
            }
        },
        Command::Config { key, value } => {
            let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            client.set_config(&key, value).await?;
            print_status(&client.status().await?);
        }
        Command::Record => {
            client.toggle_recording().await?;
            print_status(&client.status().await?);
        }
        Command::Reboot => {
            client.reboot().await?;
            println!("Rebooting...");
        }
        Command::FactoryReset { yes } => {
            if !yes {
                bail!("factory reset erases all settings; pass --yes to confirm");
            }
            client.factory_reset().await?;
            println!("Factory reset initiated.");
        }
    }

    Ok(())
}

fn print_status(status: &DeviceStatus) {
    println!("Status:    {}", status.status_label());
    println!("RTSP:      {}", status.rtsp.as_deref().unwrap_or(""));
    println!("ONVIF:     {}", status.onvif.as_deref().unwrap_or(""));
    println!("Motion:    {}", status.motion_label());
    println!(
        "Recording: {}",
        if status.recording { "yes" } else { "no" }
    );
}
