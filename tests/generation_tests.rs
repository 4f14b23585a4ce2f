mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use geo_rota_admin::cache::TokenStore;
use geo_rota_admin::controllers::route_generation_controller::{
    DEFAULT_GENERATION_ERROR, EMPTY_GENERATION_MESSAGE,
};
use geo_rota_admin::controllers::{GenerationForm, GenerationMode, GenerationOutcome, RouteGenerationController};
use geo_rota_admin::services::{
    DestinoService, EmpresaService, FuncionarioService, GrupoRotaService, NotificationCenter, RotaAutomaticaService,
    Severity, VeiculoService,
};
use geo_rota_admin::AppError;

use common::{client, funcionario_json, rota_json, spawn_api};

fn controller(base_url: &str, notifications: NotificationCenter) -> RouteGenerationController {
    let api = client(base_url, TokenStore::in_memory());
    RouteGenerationController::new(
        RotaAutomaticaService::new(api.clone()),
        EmpresaService::new(api.clone()),
        GrupoRotaService::new(api.clone()),
        FuncionarioService::new(api.clone()),
        VeiculoService::new(api.clone()),
        DestinoService::new(api),
        notifications,
    )
}

fn form(modo: GenerationMode) -> GenerationForm {
    GenerationForm {
        empresa_id: Some(1),
        grupo_rota_id: Some(2),
        data_agendada: "2025-03-10".to_string(),
        destino_id: Some(9),
        modo,
        ..Default::default()
    }
}

fn last_notification(center: &NotificationCenter) -> (Severity, String) {
    let last = center.notifications().pop().expect("a notification");
    (last.severity, last.message)
}

#[tokio::test]
async fn test_vrp_generation_returns_all_routes() {
    let body: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let recorder = body.clone();
    let router = Router::new().route(
        "/rotas/gerar-vrp",
        post(move |Json(payload): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = Some(payload);
                Json(json!([
                    rota_json(10, "2025-03-10", "manha", &[1, 2]),
                    rota_json(11, "2025-03-10", "manha", &[3]),
                ]))
            }
        }),
    );
    let base_url = spawn_api(router).await;
    let notifications = NotificationCenter::default();
    let controller = controller(&base_url, notifications.clone());

    let outcome = controller.generate(&form(GenerationMode::Vrp)).await.unwrap();

    assert!(matches!(&outcome, GenerationOutcome::Generated(rotas) if rotas.len() == 2));
    assert_eq!(
        last_notification(&notifications),
        (Severity::Success, "2 rotas geradas com sucesso!".to_string())
    );
    assert!(!controller.is_submitting());

    let sent = body.lock().unwrap().clone().expect("payload sent");
    assert_eq!(sent["modo_geracao"], "automatico");
    assert_eq!(sent["turno"], "manha");
    assert_eq!(sent["destino_id"], 9);
}

#[tokio::test]
async fn test_single_generation_uses_single_endpoint() {
    let router = Router::new().route(
        "/rotas/gerar",
        post(|| async { Json(rota_json(12, "2025-03-10", "manha", &[1])) }),
    );
    let base_url = spawn_api(router).await;
    let notifications = NotificationCenter::default();
    let controller = controller(&base_url, notifications.clone());

    let outcome = controller.generate(&form(GenerationMode::Simples)).await.unwrap();

    assert!(matches!(&outcome, GenerationOutcome::Generated(rotas) if rotas[0].id == 12));
    assert_eq!(last_notification(&notifications).1, "Rota gerada com sucesso!");
}

#[tokio::test]
async fn test_empty_vrp_result_warns() {
    let router = Router::new().route("/rotas/gerar-vrp", post(|| async { Json(json!([])) }));
    let base_url = spawn_api(router).await;
    let notifications = NotificationCenter::default();
    let controller = controller(&base_url, notifications.clone());

    let outcome = controller.generate(&form(GenerationMode::Vrp)).await.unwrap();

    assert_eq!(outcome, GenerationOutcome::Empty);
    assert_eq!(
        last_notification(&notifications),
        (Severity::Danger, EMPTY_GENERATION_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn test_failure_carries_message_and_suggestions() {
    let router = Router::new()
        .route(
            "/rotas/gerar-vrp",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "detail": {
                            "mensagem": "Capacidade insuficiente para 40 passageiros.",
                            "sugestoes": [{
                                "tipo": "micro-onibus",
                                "quantidade": 1,
                                "capacidade_por_veiculo": 25,
                                "passageiros_atendidos": 25
                            }]
                        }
                    })),
                )
                    .into_response()
            }),
        )
        .route(
            "/rotas/gerar",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        );
    let base_url = spawn_api(router).await;
    let notifications = NotificationCenter::default();
    let controller = controller(&base_url, notifications.clone());

    match controller.generate(&form(GenerationMode::Vrp)).await.unwrap() {
        GenerationOutcome::Failed { message, suggestions } => {
            assert_eq!(message, "Capacidade insuficiente para 40 passageiros.");
            assert_eq!(suggestions.len(), 1);
            assert_eq!(suggestions[0].capacidade_por_veiculo, 25);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    match controller.generate(&form(GenerationMode::Simples)).await.unwrap() {
        GenerationOutcome::Failed { message, suggestions } => {
            assert_eq!(message, DEFAULT_GENERATION_ERROR);
            assert!(suggestions.is_empty());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let controller = controller("http://127.0.0.1:9", NotificationCenter::default());
    let result = controller.generate(&GenerationForm::default()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_options_keep_only_eligible_drivers() {
    let router = Router::new()
        .route(
            "/grupos-rota",
            get(|| async {
                Json(json!([{
                    "id": 2, "empresa_id": 1, "nome": "Turno A",
                    "tipo_regime": "diario", "dias_semana_padrao": [0, 1, 2, 3, 4], "descricao": null
                }]))
            }),
        )
        .route(
            "/funcionarios",
            get(|| async { Json(json!([funcionario_json(1, "Ana", true), funcionario_json(2, "Bruno", false)])) }),
        )
        .route("/veiculos", get(|| async { Json(json!([])) }))
        .route("/destinos", get(|| async { Json(json!([])) }));
    let base_url = spawn_api(router).await;
    let controller = controller(&base_url, NotificationCenter::default());

    let options = controller.load_options(1).await.unwrap();

    assert_eq!(options.grupos.len(), 1);
    let drivers: Vec<i64> = options.motoristas.iter().map(|f| f.id).collect();
    assert_eq!(drivers, vec![1]);
}

#[tokio::test]
async fn test_aborted_generation_releases_submit_flag() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/rotas/gerar-vrp",
        post(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
                Json(json!([rota_json(20, "2025-03-10", "manha", &[1])]))
            }
        }),
    );
    let base_url = spawn_api(router).await;
    let controller = Arc::new(controller(&base_url, NotificationCenter::default()));

    let pending = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.generate(&form(GenerationMode::Vrp)).await })
    };
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(controller.is_submitting());
    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());

    assert!(!controller.is_submitting());
    let outcome = controller.generate(&form(GenerationMode::Vrp)).await.unwrap();
    assert!(matches!(outcome, GenerationOutcome::Generated(rotas) if rotas[0].id == 20));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
