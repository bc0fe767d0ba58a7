use std::{io, ops::ControlFlow, thread, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use co2mon::{AnyResult, DeviceSession, Key, Snapshot, locator, poller};
use rusb::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Prints CO2 concentration and temperature read from a 04d9:a052 USB sensor.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Key the device obfuscates its frames with, as 16 hex digits.
    #[arg(long, default_value = "0000000000000000")]
    key: Key,
    /// Exit once both a CO2 and a temperature reading were printed.
    #[arg(long)]
    once: bool,
    /// Send logs to journald instead of stderr.
    #[arg(long)]
    journald: bool,
    /// Seconds to wait before looking for the device again after losing
    /// it. With 0 the first error is fatal.
    #[arg(long, default_value_t = 5)]
    reconnect_secs: u64,
}

fn main() -> AnyResult<()> {
    let args = Args::parse();
    init_logging(args.journald)?;

    let context = Context::new().context("unable to initialize libusb")?;
    let mut snapshot = Snapshot::default();

    loop {
        match monitor(&context, &args, &mut snapshot) {
            Ok(()) => return Ok(()),
            Err(e) if args.reconnect_secs == 0 => return Err(e),
            Err(e) => {
                tracing::error!("{e:#}");
                thread::sleep(Duration::from_secs(args.reconnect_secs));
            }
        }
    }
}

fn init_logging(journald: bool) -> AnyResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if journald {
        let layer = tracing_journald::layer().context("connecting to journald")?;
        registry.with(layer).try_init()?;
    } else {
        let layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
        registry.with(layer).try_init()?;
    }

    Ok(())
}

fn monitor(context: &Context, args: &Args, snapshot: &mut Snapshot) -> AnyResult<()> {
    let mut session = {
        let device = locator::find(context)?.context("no CO2 monitor connected")?;
        tracing::info!(
            "found device on bus {} address {}",
            device.bus_number(),
            device.address()
        );

        DeviceSession::open_device(&device).context("opening device")?
    };

    session.arm(args.key).context("sending key")?;
    tracing::info!("device armed");

    poller::run(&mut session, |reading| {
        println!("{reading}");
        snapshot.update(reading);

        if !(args.once && snapshot.is_complete()) {
            return ControlFlow::Continue(());
        }

        if let (Some(ppm), Some(celsius)) = (snapshot.co2_ppm(), snapshot.celsius()) {
            tracing::info!("latest readings: {ppm} ppm, {celsius:.2} °C");
        }

        ControlFlow::Break(())
    })?;

    Ok(())
}
