mod cli;

use anyhow::Result;
use clap::Parser;
use colored::*;
use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};

use cli::{Cli, Commands, EmployeeCommands, GenerateArgs, GroupCommands, RouteCommands};
use geo_rota_admin::config::environment::EnvironmentConfig;
use geo_rota_admin::controllers::{GenerationForm, GenerationOutcome};
use geo_rota_admin::dto::route_dto::RotaListParams;
use geo_rota_admin::models::route::Rota;
use geo_rota_admin::services::Severity;
use geo_rota_admin::utils::pagination::{PageItem, TablePagination};
use geo_rota_admin::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let args = Cli::parse();

    // Configurar logging
    let level = args.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    let config = EnvironmentConfig::from_env()?;
    info!("🚌 Geo-Rota Admin ({})", config.environment);

    let state = AppState::new(config)?;
    let needs_session = !matches!(args.command, Commands::Login { .. } | Commands::Logout);
    if needs_session {
        state.session.initialize().await;
        if !state.session.is_authenticated() {
            println!("{}", "🔒 Sessão não encontrada. Use `geo-rota-admin login`.".bright_red());
            std::process::exit(1);
        }
    }

    let result = run(&state, args.command).await;
    print_notifications(&state);

    if let Err(e) = result {
        error!("❌ {}", e);
        println!("{} {}", "❌".bright_red(), e.to_string().bright_red());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(state: &AppState, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let user = state.session.login(&email, &password).await?;
            println!("{} {} <{}>", "✅ Autenticado:".bright_green().bold(), user.nome, user.email);
        }
        Commands::Logout => {
            state.session.logout();
            println!("{}", "👋 Sessão encerrada.".bright_green());
        }
        Commands::Whoami => {
            if let Some(user) = state.session.user() {
                println!("{} {} <{}> ({:?})", "👤".bright_blue(), user.nome, user.email, user.role);
            }
        }
        Commands::Routes(command) => run_routes(state, command).await?,
        Commands::Generate(args) => run_generate(state, args).await?,
        Commands::Employees(command) => run_employees(state, command).await?,
        Commands::Groups(command) => run_groups(state, command).await?,
    }
    Ok(())
}

/// Cargar la lista del día de la ruta y dejarla seleccionada, para que los
/// candidatos de remanejamiento estén disponibles
async fn select_route(state: &AppState, id: i64) -> Result<Rota> {
    let rota = state.services.rotas.get(id).await?;
    state
        .routes
        .load_routes(RotaListParams {
            empresa_id: Some(rota.empresa_id),
            data_referencia: Some(rota.data_agendada.clone()),
        })
        .await?;
    state.routes.select(rota.clone()).await?;
    Ok(rota)
}

async fn run_routes(state: &AppState, command: RouteCommands) -> Result<()> {
    let routes = &state.routes;
    match command {
        RouteCommands::List { empresa, data } => {
            let list = routes
                .load_routes(RotaListParams {
                    empresa_id: empresa,
                    data_referencia: data,
                })
                .await?;
            println!("{}", "📋 ROTAS".bright_green().bold());
            for rota in &list {
                print_route_line(rota);
            }
            if list.is_empty() {
                println!("{}", "Nenhuma rota encontrada.".dimmed());
            }
        }
        RouteCommands::Show { id } => {
            let rota = select_route(state, id).await?;
            print_route_line(&rota);
            let resources = routes.state().await.resources;
            for atribuicao in rota.sorted_assignments() {
                let nome = resources
                    .as_ref()
                    .and_then(|r| r.funcionario(atribuicao.funcionario_id))
                    .map(|f| f.nome_completo.clone())
                    .unwrap_or_else(|| format!("Funcionário #{}", atribuicao.funcionario_id));
                let ordem = atribuicao
                    .ordem_embarque
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("   {:>3}. {} ({})", ordem, nome, atribuicao.papel.as_str());
            }

            if let Some(path) = state.polylines.for_route(&rota, &CancellationToken::new()).await {
                println!("{} {} pontos no trajeto", "🗺️".bright_blue(), path.line().len());
                if let Some(advisory) = path.advisory {
                    println!("{}", advisory.bright_yellow());
                }
            }
        }
        RouteCommands::Status { id, status } => {
            select_route(state, id).await?;
            print_route_line(&routes.set_status(status).await?);
        }
        RouteCommands::Driver { id, motorista } => {
            select_route(state, id).await?;
            print_route_line(&routes.set_driver(motorista).await?);
        }
        RouteCommands::Vehicle { id, veiculo } => {
            select_route(state, id).await?;
            print_route_line(&routes.set_vehicle(veiculo).await?);
        }
        RouteCommands::Schedule { id, data, turno } => {
            select_route(state, id).await?;
            print_route_line(&routes.set_schedule(&data, turno).await?);
        }
        RouteCommands::Recalc { id, motivo } => {
            select_route(state, id).await?;
            print_route_line(&routes.recalculate(motivo).await?);
        }
        RouteCommands::Reassign { id, to, funcionarios } => {
            select_route(state, id).await?;
            print_route_line(&routes.reassign(funcionarios, to).await?);
        }
        RouteCommands::Reorder { id, from, to } => {
            select_route(state, id).await?;
            let Some(mut editor) = routes.editor().await else {
                return Ok(());
            };
            if editor.move_item(from, to) {
                print_route_line(&routes.save_editor(&editor).await?);
            } else {
                println!("{}", "Nada a alterar.".dimmed());
            }
        }
        RouteCommands::Remove { id } => {
            select_route(state, id).await?;
            routes.remove_selected().await?;
        }
    }
    Ok(())
}

async fn run_generate(state: &AppState, args: GenerateArgs) -> Result<()> {
    let form = GenerationForm {
        empresa_id: Some(args.empresa),
        grupo_rota_id: Some(args.grupo),
        data_agendada: args.data,
        turno: args.turno,
        modo: args.modo,
        motorista_id: args.motorista,
        veiculo_id: args.veiculo,
        destino_id: args.destino,
        veiculos_ids: args.veiculos,
        maximo_veiculos: args.maximo_veiculos,
        usar_frota_terceirizada: args.terceirizada.then_some(true),
        ignorar_cache: args.ignorar_cache.then_some(true),
        ..Default::default()
    };

    match state.generation.generate(&form).await? {
        GenerationOutcome::Generated(rotas) => {
            for rota in &rotas {
                print_route_line(rota);
            }
        }
        GenerationOutcome::Empty => {}
        GenerationOutcome::Failed { suggestions, .. } => {
            for sugestao in suggestions {
                println!(
                    "   {} {} x {} ({} lugares, {} passageiros)",
                    "💡 Sugestão:".bright_yellow(),
                    sugestao.quantidade,
                    sugestao.tipo,
                    sugestao.capacidade_por_veiculo,
                    sugestao.passageiros_atendidos
                );
            }
        }
    }
    Ok(())
}

async fn run_employees(state: &AppState, command: EmployeeCommands) -> Result<()> {
    match command {
        EmployeeCommands::List {
            empresa,
            page,
            page_size,
        } => {
            let funcionarios = state.employees.list(empresa).await?;
            let pagination = TablePagination::new(page, page_size, funcionarios.len());

            println!("{}", "👥 FUNCIONÁRIOS".bright_green().bold());
            for funcionario in pagination.page_slice(&funcionarios) {
                let status = if funcionario.ativo {
                    "ativo".green()
                } else {
                    "inativo".red()
                };
                println!("   #{:<5} {:<40} {}", funcionario.id, funcionario.nome_completo, status);
            }

            let pages: Vec<String> = pagination
                .range()
                .into_iter()
                .map(|item| match item {
                    PageItem::Page(p) if p == pagination.current_page => format!("[{}]", p),
                    PageItem::Page(p) => p.to_string(),
                    PageItem::Dots => "…".to_string(),
                })
                .collect();
            println!("{}  {}", pagination.summary_label().dimmed(), pages.join(" "));
        }
        EmployeeCommands::Toggle { id } => {
            let funcionario = state.services.funcionarios.get(id).await?.funcionario;
            state.employees.toggle_status(&funcionario).await?;
        }
    }
    Ok(())
}

async fn run_groups(state: &AppState, command: GroupCommands) -> Result<()> {
    match command {
        GroupCommands::List { empresa } => {
            println!("{}", "🧭 GRUPOS DE ROTA".bright_green().bold());
            for grupo in state.route_groups.list(empresa).await? {
                println!(
                    "   #{:<5} {:<30} {:<9} {}",
                    grupo.id,
                    grupo.nome,
                    grupo.tipo_regime.as_str(),
                    geo_rota_admin::controllers::route_group_controller::format_weekdays(&grupo.dias_semana_padrao)
                );
            }
        }
        GroupCommands::Remove { id } => state.route_groups.remove(id).await?,
    }
    Ok(())
}

fn print_route_line(rota: &Rota) {
    println!(
        "   #{:<5} {} {:<6} {:<12} {} passageiros",
        rota.id,
        rota.data_agendada,
        rota.turno.label(),
        rota.status.label().bright_cyan(),
        rota.passenger_count()
    );
}

/// Volcar los avisos pendientes del centro de notificaciones
fn print_notifications(state: &AppState) {
    for notification in state.notifications.notifications() {
        let line = match notification.severity {
            Severity::Success => format!("✅ {}", notification.message).bright_green(),
            Severity::Info => format!("ℹ️  {}", notification.message).bright_blue(),
            Severity::Warning => format!("⚠️  {}", notification.message).bright_yellow(),
            Severity::Danger => format!("❌ {}", notification.message).bright_red(),
        };
        println!("{}", line);
    }
    state.notifications.clear();
}
