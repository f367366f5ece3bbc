//! Logging macros.

/// Evaluates the given expression between a pair of `trace` level messages.
/// The timing is only measured when tracing is enabled.
#[macro_export]
macro_rules! with_trace_logging {
    ($message:expr $(,$arg:expr)*; $expression:expr) => {{
        if $crate::log_enabled!($crate::Level::Trace) {
            $crate::trace!(concat!("Begin: ", $message)$(,$arg)*);
            let _start_time = ::std::time::Instant::now();
            let _result = $expression;
            let _duration = _start_time.elapsed();
            $crate::trace!(
                concat!("({:.2} ms) Done: ", $message),
                _duration.as_secs_f64() * 1e3
                $(,$arg)*
            );
            _result
        } else {
            $expression
        }
    }};
}
