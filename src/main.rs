use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use maxcul_rs::{
    init_logger, log_frame_hex, log_info, log_warn, parse_cul_line, to_send_command, Address,
    Codec, CodecConfig, ControlMode, LengthPolicy, Message, MessageHeader, MessagePayload,
    SetTemperature, DEFAULT_WEEK_PROFILE,
};

#[derive(Parser)]
#[command(name = "maxcul-cli")]
#[command(about = "CLI tool for MAX! frames as spoken through a CUL dongle")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON codec configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex frame and print it as JSON
    Decode {
        frame: String,
        /// Ignore trailing bytes of payloads with unknown lengths
        #[arg(long)]
        lenient: bool,
    },
    /// Decode a line printed by the CUL firmware
    CulLine { line: String },
    /// Build a SetTemperature frame
    EncodeSetTemperature {
        source: Address,
        destination: Address,
        temperature: f64,
        #[arg(long, value_enum, default_value = "manual")]
        mode: Mode,
        #[arg(long, default_value = "0")]
        sequence: u8,
        /// Address the frame to a device group
        #[arg(long)]
        group: Option<u8>,
        /// Print the CUL send command instead of the bare frame
        #[arg(long)]
        send: bool,
    },
    /// Build the frames that program the default week profile
    DefaultProfile {
        source: Address,
        destination: Address,
        #[arg(long, default_value = "0")]
        sequence: u8,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Auto,
    Manual,
    Temporary,
    Boost,
}

impl From<Mode> for ControlMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Auto => ControlMode::Auto,
            Mode::Manual => ControlMode::Manual,
            Mode::Temporary => ControlMode::Temporary,
            Mode::Boost => ControlMode::Boost,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    let config = match &cli.config {
        Some(path) => CodecConfig::load(path)
            .with_context(|| format!("loading codec configuration {}", path.display()))?,
        None => CodecConfig::default(),
    };

    match cli.command {
        Commands::Decode { frame, lenient } => {
            let config = if lenient {
                CodecConfig {
                    length_policy: LengthPolicy::Lenient,
                    ..config
                }
            } else {
                config
            };
            let message = Codec::new(config)
                .decode(&frame)
                .with_context(|| format!("decoding frame {frame}"))?;
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
        Commands::CulLine { line } => {
            let received = parse_cul_line(&line).context("parsing CUL line")?;
            log_frame_hex("CUL frame", &received.frame.to_bytes());
            if let Some(rssi) = received.rssi_dbm {
                log_info(&format!("RSSI {rssi} dBm"));
            }
            let message = Codec::new(config).decode_frame(&received.frame)?;
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
        Commands::EncodeSetTemperature {
            source,
            destination,
            temperature,
            mode,
            sequence,
            group,
            send,
        } => {
            let mut header = MessageHeader::new(sequence, source, destination);
            if let Some(group_id) = group {
                header = header.with_group(group_id);
            }
            if mode == Mode::Temporary {
                log_warn("Temporary mode without an until-date falls back to the device default");
            }
            let message = Message::new(
                header,
                MessagePayload::SetTemperature(SetTemperature::new(mode.into(), temperature)),
            );
            let hex = Codec::new(config).encode(&message);
            println!("{}", if send { to_send_command(&hex) } else { hex });
        }
        Commands::DefaultProfile {
            source,
            destination,
            sequence,
        } => {
            let codec = Codec::new(config);
            for (i, part) in DEFAULT_WEEK_PROFILE.parts().into_iter().enumerate() {
                let header = MessageHeader::new(sequence.wrapping_add(i as u8), source, destination);
                let message = Message::new(header, MessagePayload::ConfigureWeekProfile(part));
                println!("{}", codec.encode(&message));
            }
        }
    }

    Ok(())
}
