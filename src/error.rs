use thiserror::Error;

/// fatal 级别日志触发的升级信号
///
/// 这是控制流的一部分而不是故障报告：记录已经完整写入各 sink 之后，
/// 调用方会收到这个错误，自行决定是向上传播还是就地终止进程。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("fatal error occurred, check logs for details")]
pub struct FatalError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_error_message() {
        assert_eq!(
            FatalError.to_string(),
            "fatal error occurred, check logs for details"
        );
    }

    #[test]
    fn test_fatal_error_propagates_through_anyhow() {
        fn boom() -> anyhow::Result<()> {
            let signal: Result<(), FatalError> = Err(FatalError);
            signal?;
            Ok(())
        }
        let err = boom().unwrap_err();
        assert!(err.is::<FatalError>());
    }
}
