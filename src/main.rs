use clap::{Parser, Subcommand};
use qrgen::encoding::RustBackend;
use qrgen::request::{ErrorCorrection, GenerationRequest, OutputFormat};
use qrgen::{generate, server};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qrgen")]
#[command(about = "Static QR code generator")]
#[command(long_about = "\
Static QR code generator

Encodes a URL or any text into a QR code image. The code is static: it
encodes the data directly, so it never expires as long as the target stays
valid. Encoding is delegated to the qrcode crate; this tool is validation
and output glue.

Examples:

  qrgen generate \"https://example.com\"
  qrgen generate \"https://example.com\" -o codes/site.png --size 8 --level high
  qrgen generate \"hello\" --format svg -o hello.svg
  qrgen serve --bind 0.0.0.0:5000")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into a QR image file
    Generate(GenerateArgs),
    /// Run the web front end
    Serve(ServeArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// The URL or text to encode
    data: String,

    /// Output file path
    #[arg(long, short, default_value = "qr.png")]
    output: PathBuf,

    /// Size of each module in pixels
    #[arg(long, default_value_t = 10)]
    size: u32,

    /// Quiet zone around the code, in modules
    #[arg(long, default_value_t = 4)]
    border: u32,

    /// Error-correction level
    #[arg(long, value_enum, default_value = "medium")]
    level: ErrorCorrection,

    /// Output image format
    #[arg(long, value_enum, default_value = "png")]
    format: OutputFormat,
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => {
            let request = GenerationRequest {
                size: args.size,
                border: args.border,
                level: args.level,
                format: args.format,
                ..GenerationRequest::new(args.data)
            };
            let result = generate::generate(&RustBackend::new(), &request)?;
            generate::write_image(&result, &args.output)?;
            println!(
                "==> Wrote {} ({} bytes)",
                args.output.display(),
                result.bytes.len()
            );
        }
        Command::Serve(args) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "qrgen=info".into()),
                )
                .init();
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(server::serve(args.bind))?;
        }
    }

    Ok(())
}
