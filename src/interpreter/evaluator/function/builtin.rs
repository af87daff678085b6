use log::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::usize_to_f64,
};

/// Returns the element count of an array.
///
/// Any other value has length zero, strings included.
///
/// # Example
/// ```
/// use splice::interpreter::{
///     evaluator::{core::Context, function::builtin::len},
///     value::core::Value,
/// };
///
/// let mut context = Context::new();
/// let array = Value::from(vec![Value::ZERO, Value::ZERO]);
///
/// assert_eq!(len(&mut context, &[array]).unwrap(), Value::Number(2.0));
/// assert_eq!(len(&mut context, &[Value::from("text")]).unwrap(), Value::ZERO);
/// ```
#[allow(clippy::unnecessary_wraps)]
pub fn len(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let count = args[0].as_array().map_or(0, |array| array.borrow().len());
    Ok(Value::Number(usize_to_f64(count)))
}

/// Appends the second argument to the array given as the first.
///
/// The array is shared, so every variable holding it sees the new element.
///
/// # Returns
/// Number 1.
///
/// # Errors
/// - `TypeError` if the first argument is not an array.
/// - `ArrayTooLarge` if the array cannot grow.
pub fn append(_context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let Some(array) = args[0].as_array() else {
        return Err(RuntimeError::TypeError { details: format!("append() expects an array, got {}",
                                                              args[0].type_name()), });
    };

    let mut array = array.borrow_mut();
    let len = array.len().saturating_add(1);
    array.push(args[1].clone())
         .map_err(|_| RuntimeError::ArrayTooLarge { len })?;
    trace!("append: array now holds {} elements", array.len());

    Ok(Value::Number(1.0))
}

/// Reads one line of input.
///
/// An optional argument is printed first as a prompt, without a newline. The
/// line is returned without its terminator; at the end of input the result
/// is the empty string.
pub fn input(context: &mut Context, args: &[Value]) -> EvalResult<Value> {
    let prompt = args.first().map(ToString::to_string);
    let line = context.read_line(prompt.as_deref())?;
    Ok(Value::Str(line))
}
