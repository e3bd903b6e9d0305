//! Response classification.

use jobgate_api::{Response, ResponseCode, ResponseResult};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Map a scheduler response to success or a `RemoteOperation` error.
///
/// Only `OK` is success. Every other code, `WARNING` included, fails with
/// the scheduler's message carried verbatim.
pub fn classify(method: &'static str, response: Response) -> ClientResult<Option<ResponseResult>> {
    match response.response_code {
        ResponseCode::Ok => {
            debug!(method, message = %response.message, "scheduler call succeeded");
            Ok(response.result)
        }
        code => {
            warn!(method, %code, message = %response.message, "scheduler call failed");
            Err(ClientError::RemoteOperation {
                method,
                code,
                message: response.message,
            })
        }
    }
}
