//! Utilidades compartidas por los tests de integración: servidor API falso
//! con axum y fixtures JSON.

#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;

use geo_rota_admin::cache::TokenStore;
use geo_rota_admin::client::ApiClient;

/// Levantar `router` en un puerto libre y devolver su URL base
pub async fn spawn_api(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock api");
    let addr = listener.local_addr().expect("mock api address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock api server");
    });
    format!("http://{}", addr)
}

pub fn client(base_url: &str, store: TokenStore) -> ApiClient {
    ApiClient::new(base_url, store, Duration::from_secs(5)).expect("api client")
}

pub fn user_json() -> Value {
    json!({
        "id": 1,
        "nome": "Ana Admin",
        "email": "ana@georota.com",
        "role": "admin",
        "is_active": true
    })
}

pub fn atribuicao_json(rota_id: i64, funcionario_id: i64, ordem: i32) -> Value {
    json!({
        "id": rota_id * 100 + funcionario_id,
        "rota_id": rota_id,
        "funcionario_id": funcionario_id,
        "papel": "passageiro",
        "ordem_embarque": ordem,
        "hora_embarque": null,
        "latitude": -22.9 - funcionario_id as f64 / 100.0,
        "longitude": -47.06
    })
}

pub fn rota_json(id: i64, data: &str, turno: &str, funcionarios: &[i64]) -> Value {
    let atribuicoes: Vec<Value> = funcionarios
        .iter()
        .enumerate()
        .map(|(ordem, funcionario_id)| atribuicao_json(id, *funcionario_id, ordem as i32))
        .collect();
    json!({
        "id": id,
        "empresa_id": 1,
        "grupo_rota_id": 1,
        "data_agendada": data,
        "turno": turno,
        "status": "rascunho",
        "modo_geracao": "automatico",
        "motorista_id": null,
        "veiculo_id": null,
        "destino_id": null,
        "atribuicoes": atribuicoes
    })
}

pub fn funcionario_json(id: i64, nome: &str, driver: bool) -> Value {
    json!({
        "id": id,
        "empresa_id": 1,
        "nome_completo": nome,
        "cpf": "12345678901",
        "email": null,
        "telefone": null,
        "logradouro": "Rua A",
        "numero": "1",
        "complemento": null,
        "bairro": "Centro",
        "cidade": "Campinas",
        "estado": "SP",
        "cep": "13010000",
        "possui_cnh": driver,
        "categoria_cnh": if driver { json!("B") } else { Value::Null },
        "cnh_valida_ate": null,
        "apto_dirigir": driver,
        "ativo": true
    })
}
