//! # Pizzas ECOS
//!
//! Headless run of the order client: resolves the backend, optionally logs in,
//! loads the reference data and the sales list, and logs the dashboard summary.
//!
//! ```bash
//! RUST_LOG=info pizzas-ecos --hostname qa-ecos.web.app --username admin --password 1234
//! ```

use std::path::PathBuf;

use clap::Parser;
use pizzas_ecos::config::Config;
use pizzas_ecos::lifecycle::{setup_tracing, Session};
use pizzas_ecos::stats::{desglose_vendedor, pizzas_por_tipo, resumir};
use pizzas_ecos::ui::format_currency;
use tracing::{info, Instrument};

#[derive(Debug, Parser)]
#[command(name = "pizzas-ecos", about = "Pizzas ECOS order client")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides every other source
    #[arg(long)]
    backend_url: Option<String>,

    /// Host the frontend would be served from
    #[arg(long)]
    hostname: Option<String>,

    #[arg(long)]
    username: Option<String>,

    #[arg(long, requires = "username")]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    }
    .with_env();
    if args.hostname.is_some() {
        config.hostname = args.hostname.clone();
    }

    let session =
        Session::from_config(&config, args.backend_url.as_deref()).map_err(|e| e.to_string())?;

    if let Some(username) = &args.username {
        let password = args.password.as_deref().unwrap_or_default();
        session
            .auth
            .login(username, password)
            .instrument(tracing::info_span!("login"))
            .await
            .map_err(|e| e.to_string())?;
    }

    let datos = session
        .ventas
        .cargar_datos()
        .instrument(tracing::info_span!("cargar_datos"))
        .await
        .map_err(|e| e.to_string())?;

    let ventas = session
        .ventas
        .obtener_ventas()
        .instrument(tracing::info_span!("obtener_ventas"))
        .await
        .map_err(|e| e.to_string())?;

    let resumen = resumir(&ventas);
    info!(
        ventas = resumen.ventas_totales,
        cobrado = %format_currency(resumen.total_cobrado),
        pendiente = %format_currency(resumen.pendiente_cobro),
        delivery = resumen.total_delivery,
        retiro = resumen.total_retiro,
        "Resumen"
    );

    for tipo in pizzas_por_tipo(&ventas, &config.combos) {
        info!(tipo = %tipo.tipo, pizzas = tipo.pizzas, "Pizzas vendidas");
    }

    for vendedor in &datos.vendedores {
        let desglose = desglose_vendedor(&vendedor.nombre, &ventas, &config.combos);
        let pizzas: Vec<String> = desglose
            .pizzas
            .iter()
            .map(|p| format!("{} {}", p.pizzas, p.tipo))
            .collect();
        info!(
            vendedor = %desglose.nombre,
            ventas = desglose.cantidad_ventas,
            pizzas = %pizzas.join(", "),
            deuda = %format_currency(desglose.deuda_total),
            pagado = %format_currency(desglose.pagado_total),
            "Vendedor"
        );
    }

    session.shutdown().await
}
