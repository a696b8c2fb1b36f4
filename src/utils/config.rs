//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Extension carried by raw sampling files, one file per run
pub const SAMPLE_EXTENSION: &str = ".sample";

/// Run ordinal token embedded in every sample filename
pub const RUN_ORDINAL_PATTERN: &str = r"_vm_(\d+)_";

/// Default upper bound on parse workers when none is requested
pub const DEFAULT_MAX_THREADS: usize = 1;

// Frame label prefixes recognized as JVM/native runtime infrastructure.
// Matched against the start of the label after stripping any leading
// "<type-id> " token that sampling frontends prepend.
pub const INFRA_FRAME_PREFIXES: &[&str] = &[
    "java.",
    "javax.",
    "jdk.",
    "sun.",
    "com.sun.",
    "libjvm",
    "libc",
    "libpthread",
    "JVM_",
    "os::",
    "thread_start",
    "start_thread",
    "call_stub",
    "Interpreter",
    "Compile::",
    "C2Compiler",
    "GCTaskThread",
    "[unknown",
];
