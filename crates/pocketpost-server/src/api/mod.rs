pub mod entries;

#[derive(serde::Serialize)]
pub struct Health {
    status: String,
}

pub async fn health() -> axum::Json<Health> {
    axum::Json(Health {
        status: "pocketpost is working!".to_string(),
    })
}
