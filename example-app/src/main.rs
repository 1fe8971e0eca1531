//! # 示例应用程序
//!
//! 声明一组服务定义，扫描之后把模板输入以 JSON 打印到标准输出。

use clap::Parser;
use di_abstractions::{Definition, Describe, FuncDescriptor, Param, TypeDescriptor};
use di_common::lifecycle;
use di_composition::{GeneratorBuilder, LoggingConfig};
use di_impl::BaseProvider;
use di_macros::Describe;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "DI 容器生成器示例")]
struct Args {
    /// 配置文件路径（TOML 或 JSON）
    #[arg(short, long)]
    config: Option<String>,

    /// 生成的容器包名称
    #[arg(long)]
    package_name: Option<String>,

    /// 日志过滤指令，例如 `info,di_impl=debug`
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 应用配置
#[derive(Describe)]
#[describe(namespace = "example.io/app/config", name = "Config")]
pub struct AppConfig {
    #[describe(rename = "Dsn")]
    pub dsn: String,
    #[describe(rename = "Debug")]
    pub debug: bool,
}

/// 数据库连接池
#[derive(Describe)]
#[describe(namespace = "example.io/app/db", methods(Close))]
pub struct Pool {
    #[describe(skip)]
    pub connections: Vec<String>,
}

/// 邮件服务
#[derive(Describe)]
#[describe(namespace = "example.io/app/mail")]
pub struct Mailer {
    #[describe(rename = "Pool")]
    pub pool: Box<Pool>,
    #[describe(rename = "From")]
    pub from: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut builder =
        GeneratorBuilder::new().with_logging(LoggingConfig::with_filter(&args.log_level));

    if let Some(path) = &args.config {
        builder = builder.add_config_file(path)?;
    }
    if let Some(name) = &args.package_name {
        builder = builder.with_package_name(name);
    }

    let generator = builder.build()?;

    let provider = build_provider()?;
    let input = generator.generate(provider)?;

    info!(
        "扫描完成: {} 个定义, {} 个导入",
        input.definitions.len(),
        input.definitions_imports.len()
    );
    println!("{}", input.to_json()?);

    Ok(())
}

/// 声明示例服务定义
fn build_provider() -> Result<BaseProvider, Box<dyn std::error::Error>> {
    let config = TypeDescriptor::pointer(AppConfig::describe());
    let pool = TypeDescriptor::pointer(Pool::describe());

    let mut provider = BaseProvider::new();
    provider.add_all(vec![
        Definition::new("config", config.clone())
            .with_param("Dsn", Param::value("postgres://localhost/app"))
            .with_param("Debug", Param::AutoFill(false)),
        Definition::new(
            "db-pool",
            TypeDescriptor::func(FuncDescriptor::constructor(vec![config], pool.clone())),
        )
        .with_scope(lifecycle::APP)
        .with_close(TypeDescriptor::func(FuncDescriptor::closer(pool)))
        .with_description("数据库连接池"),
        Definition::new("mailer", TypeDescriptor::pointer(Mailer::describe()))
            .with_param("From", Param::value("noreply@example.io"))
            .unshared(),
    ])?;

    Ok(provider)
}
