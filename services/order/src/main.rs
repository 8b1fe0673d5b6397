//! Order Service - 订单服务入口

use std::sync::Arc;

use order_service::FILE_DESCRIPTOR_SET;
use order_service::api::{AuthorizationChain, OrderServiceImpl};
use order_service::application::OrderWorkflow;
use order_service::domain::{IdentityService, OrderRepository};
use order_service::infrastructure::{BrokerNotifier, PostgresOrderRepository, SsoIdentityService};
use order_service::proto::order::v1::order_service_server::OrderServiceServer;
use petstore_adapter_amqp::MessagePublisher;
use petstore_bootstrap::{
    build_reflection, logging_layer, recovery_layer, run_server, shutdown_signal,
};
use petstore_errors::AppError;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server("config", |infra, server, addr| async move {
        info!("Initializing Order Service...");
        let config = infra.config();

        let pool = infra.postgres_pool();
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to run migrations: {}", e)))?;
        info!("Database migrations applied");

        let identity: Arc<dyn IdentityService> =
            Arc::new(SsoIdentityService::new(infra.sso_channel()));
        let repository: Arc<dyn OrderRepository> =
            Arc::new(PostgresOrderRepository::new(pool));
        let publisher: Arc<dyn MessagePublisher> = infra.amqp_publisher();

        let notifier = Arc::new(BrokerNotifier::new(
            identity.clone(),
            publisher,
            config.amqp.queue.clone(),
        ));
        let workflow = Arc::new(OrderWorkflow::new(
            repository,
            notifier,
            config.notification.policy,
        ));
        let authorization = Arc::new(AuthorizationChain::standard(identity));
        info!(policy = ?config.notification.policy, "Order workflow initialized");

        let reflection_service = build_reflection(FILE_DESCRIPTOR_SET)?;

        server
            .layer(recovery_layer())
            .layer(logging_layer())
            .add_service(OrderServiceServer::new(OrderServiceImpl::new(
                workflow,
                authorization,
            )))
            .add_service(reflection_service)
            .serve_with_shutdown(addr, shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("gRPC server error: {}", e)))
    })
    .await
}
