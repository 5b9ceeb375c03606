//! CLI command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use evmcore_common::Code;
use evmcore_verifier::{CodeReport, Terminator};
use evmcore_vm::{ExitStatus, VmConfig};
use tracing::{debug, info};

/// Where `run` gets its bytecode.
pub enum Source {
    File { path: PathBuf, hex: bool },
    Inline(String),
}

/// Assemble a text file to bytecode.
pub fn assemble(input: &Path, output: Option<&Path>, hex: bool) -> Result<(), i32> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("bin"));

    let text = fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", input.display());
        1
    })?;

    let code = evmcore_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    let written = if hex {
        let mut text = code.to_hex();
        text.push('\n');
        fs::write(&output, text)
    } else {
        fs::write(&output, code.as_bytes())
    };
    written.map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })?;

    eprintln!(
        "assembled {} bytes -> {}",
        code.len(),
        output.display()
    );
    Ok(())
}

/// Disassemble bytecode to canonical text on stdout.
pub fn disassemble(input: &Path, hex: bool) -> Result<(), i32> {
    let code = read_code(input, hex)?;
    print!("{}", evmcore_assembler::disassemble(&code));
    Ok(())
}

/// Verify bytecode, printing a summary on success.
pub fn verify(input: &Path, hex: bool) -> Result<(), i32> {
    let code = read_code(input, hex)?;
    let report = check(&code)?;
    println!(
        "OK: {} ({} bytes, {} instructions, max stack {}, ends with {})",
        input.display(),
        report.code_len,
        report.instruction_count,
        report.max_stack_height,
        describe_terminator(report.terminator)
    );
    Ok(())
}

/// Optionally verify, then execute bytecode.
pub fn run(source: Source, verify_first: bool, memory_limit: Option<usize>) -> Result<(), i32> {
    let code = match source {
        Source::File { path, hex } => read_code(&path, hex)?,
        Source::Inline(text) => Code::from_hex(&text).map_err(|e| {
            eprintln!("error: --code: {e}");
            1
        })?,
    };

    if verify_first {
        check(&code)?;
    }

    let mut config = VmConfig::default();
    if let Some(limit) = memory_limit {
        config = config.with_memory_limit(limit);
    }
    info!(code_len = code.len(), memory_limit = config.memory_limit, "executing");

    match evmcore_vm::run_with_config(&code, config) {
        Ok(outcome) => {
            let status = match outcome.status {
                ExitStatus::Halted => "halted",
                ExitStatus::Returned => "returned",
            };
            println!("{status} 0x{}", hex::encode(&outcome.return_data));
            Ok(())
        }
        Err(e) => {
            eprintln!("fault: {e}");
            Err(3)
        }
    }
}

fn check(code: &Code) -> Result<CodeReport, i32> {
    evmcore_verifier::verify(code).map_err(|errors| {
        for e in &errors {
            eprintln!("error: {e}");
        }
        2
    })
}

fn describe_terminator(terminator: Terminator) -> String {
    match terminator {
        Terminator::Stop { at } => format!("STOP at {at}"),
        Terminator::Return { at } => format!("RETURN at {at}"),
        Terminator::EndOfCode => "end of code".to_string(),
        Terminator::Invalid { at } => format!("invalid byte at {at}"),
    }
}

fn read_code(path: &Path, hex: bool) -> Result<Code, i32> {
    debug!(path = %path.display(), hex, "loading code");
    if hex {
        let text = fs::read_to_string(path).map_err(|e| {
            eprintln!("error: cannot read '{}': {e}", path.display());
            1
        })?;
        Code::from_hex(text.trim()).map_err(|e| {
            eprintln!("error: '{}': {e}", path.display());
            1
        })
    } else {
        let bytes = fs::read(path).map_err(|e| {
            eprintln!("error: cannot read '{}': {e}", path.display());
            1
        })?;
        Ok(Code::new(bytes))
    }
}
