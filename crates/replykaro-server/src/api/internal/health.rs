//! Liveness endpoint.

pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        assert_eq!(health_check().await, "OK");
    }
}
