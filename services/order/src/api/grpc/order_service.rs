//! OrderService gRPC 服务实现

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::application::OrderWorkflow;
use crate::proto::order::v1::order_service_server::OrderService;
use crate::proto::order::v1::{
    CreateOrderRequest, CreateOrderResponse, GetOrderRequest, GetOrderResponse,
    GetOrdersByUserIdRequest, ListOrdersRequest, ListOrdersResponse,
};

use super::authorization::{AuthorizationChain, RequestFacts, extract_bearer_token, methods};
use super::conversions::{detail_to_proto, order_to_proto, parse_order_id};

pub struct OrderServiceImpl {
    workflow: Arc<OrderWorkflow>,
    authorization: Arc<AuthorizationChain>,
}

impl OrderServiceImpl {
    pub fn new(workflow: Arc<OrderWorkflow>, authorization: Arc<AuthorizationChain>) -> Self {
        Self {
            workflow,
            authorization,
        }
    }
}

#[tonic::async_trait]
impl OrderService for OrderServiceImpl {
    async fn create_order(
        &self,
        request: Request<CreateOrderRequest>,
    ) -> Result<Response<CreateOrderResponse>, Status> {
        self.authorization
            .intercept(methods::CREATE_ORDER, request.metadata(), &RequestFacts::default())
            .await?;
        let token = extract_bearer_token(request.metadata());

        let new_order = request
            .into_inner()
            .order
            .ok_or_else(|| Status::invalid_argument("order is required"))?;

        let detail = self
            .workflow
            .create_order(new_order.user_id, new_order.item_id, token.as_deref())
            .await?;

        Ok(Response::new(CreateOrderResponse {
            order: Some(detail_to_proto(&detail)),
        }))
    }

    async fn list_orders(
        &self,
        request: Request<ListOrdersRequest>,
    ) -> Result<Response<ListOrdersResponse>, Status> {
        self.authorization
            .intercept(methods::LIST_ORDERS, request.metadata(), &RequestFacts::default())
            .await?;

        let orders = self.workflow.list_orders().await?;

        Ok(Response::new(ListOrdersResponse {
            orders: orders.iter().map(order_to_proto).collect(),
        }))
    }

    async fn get_order(
        &self,
        request: Request<GetOrderRequest>,
    ) -> Result<Response<GetOrderResponse>, Status> {
        self.authorization
            .intercept(methods::GET_ORDER, request.metadata(), &RequestFacts::default())
            .await?;

        let id = parse_order_id(&request.get_ref().id)?;
        let order = self.workflow.get_order(id).await?;

        Ok(Response::new(GetOrderResponse {
            order: Some(order_to_proto(&order)),
        }))
    }

    async fn get_order_by_user_id(
        &self,
        request: Request<GetOrdersByUserIdRequest>,
    ) -> Result<Response<ListOrdersResponse>, Status> {
        let user_id = request.get_ref().user_id;
        self.authorization
            .intercept(
                methods::GET_ORDER_BY_USER_ID,
                request.metadata(),
                &RequestFacts::for_user(user_id),
            )
            .await?;

        if user_id == 0 {
            return Err(Status::invalid_argument("user_id is required"));
        }

        let orders = self.workflow.get_orders_by_user_id(user_id).await?;

        Ok(Response::new(ListOrdersResponse {
            orders: orders.iter().map(detail_to_proto).collect(),
        }))
    }
}
