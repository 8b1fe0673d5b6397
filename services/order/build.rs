use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    println!("cargo:rerun-if-changed=../../proto/order/v1/order.proto");
    println!("cargo:rerun-if-changed=../../proto/sso/v1/sso.proto");

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("order_descriptor.bin"))
        .compile_protos(&["../../proto/order/v1/order.proto"], &["../../proto"])?;

    // SSO 服务只需要客户端
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(&["../../proto/sso/v1/sso.proto"], &["../../proto"])?;

    Ok(())
}
