//! Argumentos de línea de comandos

use clap::{Args, Parser, Subcommand};

use geo_rota_admin::controllers::GenerationMode;
use geo_rota_admin::models::route::{StatusRota, TurnoTrabalho};

fn parse_status(value: &str) -> Result<StatusRota, String> {
    StatusRota::from_str(value).ok_or_else(|| {
        let valid: Vec<&str> = StatusRota::ALL.iter().map(StatusRota::as_str).collect();
        format!("status inválido '{}', use: {}", value, valid.join(", "))
    })
}

fn parse_turno(value: &str) -> Result<TurnoTrabalho, String> {
    TurnoTrabalho::from_str(value).ok_or_else(|| format!("turno inválido '{}', use: manha, tarde, noite", value))
}

fn parse_modo(value: &str) -> Result<GenerationMode, String> {
    GenerationMode::from_str(value).ok_or_else(|| format!("modo inválido '{}', use: simples, vrp", value))
}

#[derive(Parser, Debug)]
#[command(name = "geo-rota-admin", version, about = "Painel administrativo do Geo-Rota")]
pub struct Cli {
    /// Nivel de log (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "GEO_ROTA_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Autenticar y guardar el token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "GEO_ROTA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Borrar el token guardado
    Logout,
    /// Mostrar el usuario autenticado
    Whoami,
    /// Rutas generadas
    #[command(subcommand)]
    Routes(RouteCommands),
    /// Generar rutas automáticamente
    Generate(GenerateArgs),
    /// Funcionarios
    #[command(subcommand)]
    Employees(EmployeeCommands),
    /// Grupos de rota
    #[command(subcommand)]
    Groups(GroupCommands),
}

#[derive(Subcommand, Debug)]
pub enum RouteCommands {
    List {
        #[arg(long)]
        empresa: Option<i64>,
        /// Fecha de referencia YYYY-MM-DD
        #[arg(long)]
        data: Option<String>,
    },
    /// Detalle con pasajeros y trayecto
    Show { id: i64 },
    Status {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: StatusRota,
    },
    /// Sin --motorista el servidor elige
    Driver {
        id: i64,
        #[arg(long)]
        motorista: Option<i64>,
    },
    /// Sin --veiculo el servidor elige
    Vehicle {
        id: i64,
        #[arg(long)]
        veiculo: Option<i64>,
    },
    Schedule {
        id: i64,
        #[arg(long)]
        data: String,
        #[arg(long, value_parser = parse_turno, default_value = "manha")]
        turno: TurnoTrabalho,
    },
    Recalc {
        id: i64,
        #[arg(long)]
        motivo: Option<String>,
    },
    /// Mover funcionarios a otra ruta con la misma fecha y turno
    Reassign {
        id: i64,
        #[arg(long)]
        to: i64,
        #[arg(long, value_delimiter = ',', required = true)]
        funcionarios: Vec<i64>,
    },
    /// Cambiar la orden de embarque (posiciones desde 0)
    Reorder {
        id: i64,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    Remove { id: i64 },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long)]
    pub empresa: i64,
    #[arg(long)]
    pub grupo: i64,
    /// Fecha YYYY-MM-DD
    #[arg(long)]
    pub data: String,
    #[arg(long, value_parser = parse_turno, default_value = "manha")]
    pub turno: TurnoTrabalho,
    #[arg(long, value_parser = parse_modo, default_value = "vrp")]
    pub modo: GenerationMode,
    #[arg(long)]
    pub destino: Option<i64>,
    #[arg(long)]
    pub motorista: Option<i64>,
    #[arg(long)]
    pub veiculo: Option<i64>,
    #[arg(long, value_delimiter = ',')]
    pub veiculos: Vec<i64>,
    #[arg(long)]
    pub maximo_veiculos: Option<i32>,
    #[arg(long)]
    pub terceirizada: bool,
    #[arg(long)]
    pub ignorar_cache: bool,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommands {
    List {
        #[arg(long)]
        empresa: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Desactivar o reactivar
    Toggle { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    List {
        #[arg(long)]
        empresa: Option<i64>,
    },
    Remove { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reassign() {
        let cli = Cli::try_parse_from([
            "geo-rota-admin",
            "routes",
            "reassign",
            "7",
            "--to",
            "9",
            "--funcionarios",
            "1,2,3",
        ])
        .unwrap();
        match cli.command {
            Commands::Routes(RouteCommands::Reassign { id, to, funcionarios }) => {
                assert_eq!((id, to), (7, 9));
                assert_eq!(funcionarios, vec![1, 2, 3]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        assert!(Cli::try_parse_from(["geo-rota-admin", "routes", "status", "1", "pausada"]).is_err());
    }
}
