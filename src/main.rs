//! 主入口模块

fn main() {
    std::process::exit(vision_ocr::bootstrap::main());
}
