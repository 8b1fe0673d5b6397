//! gRPC 服务器外层 Layer
//!
//! 最外层为 panic 恢复，其次为请求/响应日志

use std::any::Any;

use http::{HeaderValue, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::classify::{GrpcErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::error;

/// panic 处理函数类型
pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response<String>;

/// 将 handler 中的 panic 转换为 gRPC `INTERNAL` 响应
pub fn recovery_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_to_grpc_status as PanicHandler)
}

/// 请求/响应日志
pub fn logging_layer() -> TraceLayer<SharedClassifier<GrpcErrorsAsFailures>> {
    TraceLayer::new_for_grpc()
}

fn panic_to_grpc_status(panic: Box<dyn Any + Send + 'static>) -> Response<String> {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!(panic = %detail, "Recovered from panic");

    // gRPC 错误通过 trailers-only 响应返回，HTTP 状态码固定为 200
    let mut response = Response::new(String::new());
    let headers = response.headers_mut();
    headers.insert("content-type", HeaderValue::from_static("application/grpc"));
    headers.insert("grpc-status", HeaderValue::from_static("13"));
    headers.insert("grpc-message", HeaderValue::from_static("internal%20error"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_maps_to_internal() {
        let response = panic_to_grpc_status(Box::new("boom"));
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(response.headers()["grpc-status"], "13");
        assert_eq!(response.headers()["content-type"], "application/grpc");
    }
}
