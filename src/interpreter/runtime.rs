/// Native function and native module registries.
///
/// Natives are host functions callable from Splice code. Modules group them
/// under a name so that `import "<name>.h"` can register a whole table.
pub mod natives;

/// Source loading for `import`.
///
/// Defines the `SourceLoader` trait with a file system implementation and an
/// in-memory one for embedding and tests.
pub mod loader;

/// The user function table.
pub mod functions;

/// The flat variable table.
///
/// Variables live in a single growable sequence of slots. Function calls push
/// their parameters on top and truncate back to the previous length on exit.
pub mod variables;

pub use functions::FunctionTable;
pub use loader::{FsLoader, MemoryLoader, SourceLoader};
pub use natives::{ModuleRegistry, NativeFn, NativeRegistry};
pub use variables::VariableTable;
