//! order-service - 订单服务
//!
//! 接收创建 / 查询订单的 gRPC 请求，鉴权委托给外部 SSO 服务，
//! 订单创建成功后向 broker 发布通知

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod testing;

pub mod proto {
    pub mod order {
        pub mod v1 {
            tonic::include_proto!("order.v1");
        }
    }

    pub mod sso {
        pub mod v1 {
            tonic::include_proto!("sso.v1");
        }
    }
}

/// 文件描述符集 (用于 gRPC 反射)
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("order_descriptor");
