//! Smoke test to verify workflow-tests infrastructure.

mod common;

#[tokio::test]
async fn all_services_report_healthy() {
    let ctx = common::setup().await;

    for (name, url) in ctx.endpoints.health_urls() {
        let response = ctx.get(&url).await.expect("Health request failed");
        assert_eq!(response.status().as_u16(), 200, "{} is not healthy", name);
    }
}

#[tokio::test]
async fn each_service_starts_with_empty_collections() {
    let ctx = common::setup().await;

    let urls = [
        ctx.gerenciamento("/professores"),
        ctx.gerenciamento("/turmas"),
        ctx.gerenciamento("/alunos"),
        ctx.atividades("/atividades"),
        ctx.atividades("/notas"),
        ctx.reservas("/reservas"),
    ];

    for url in urls {
        let response = ctx.get(&url).await.expect("List request failed");
        assert_eq!(response.status().as_u16(), 200, "GET {}", url);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!([]), "GET {}", url);
    }
}
