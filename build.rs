//! Build script compiling the C kernels.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_kernel_active)");

    let detect = cc::Build::new();
    let compiler = match detect.try_get_compiler() {
        Ok(compiler) => compiler,
        Err(e) => {
            println!("cargo:warning=No usable C compiler ({}). C kernels disabled.", e);
            return;
        }
    };

    let compiler_name = if compiler.is_like_msvc() {
        "MSVC"
    } else if compiler.is_like_clang() {
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        if target_os == "macos" {
            "Apple Clang"
        } else {
            "Clang"
        }
    } else if compiler.is_like_gnu() {
        "GCC"
    } else {
        println!("cargo:warning=C compiler is not GCC, Clang or MSVC. C kernels disabled.");
        return;
    };

    let mut build = cc::Build::new();

    let c_files = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect::<Vec<_>>(),
        Err(e) => {
            println!("cargo:warning=Bad glob pattern ({}). C kernels disabled.", e);
            return;
        }
    };
    if c_files.is_empty() {
        return;
    }

    for file in &c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    // No -ffast-math, and no FMA contraction (GCC contracts by default, which
    // -march=native would turn into fused multiply-adds): the C reference loop
    // must round exactly like the Rust one.
    build.opt_level(3);
    build.flag_if_supported("-ffp-contract=off");

    let rustflags = env::var("RUSTFLAGS").unwrap_or_default();
    let encoded_rustflags = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    if rustflags.contains("target-cpu=native") || encoded_rustflags.contains("target-cpu=native") {
        build.flag_if_supported("-march=native");
    }

    if let Err(e) = build.try_compile("dot_product_c") {
        println!("cargo:warning=C kernel compilation failed ({}). C kernels disabled.", e);
        return;
    }

    println!("cargo:rustc-cfg=c_kernel_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
