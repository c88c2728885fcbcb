use crate::error::Error;

/// Validates that the passed in Sui address is:
///
/// * a hex string prefixed with 0x
/// * 66 characters long (0x + 32 bytes)
/// * all characters after the 0x are valid ascii hex digits
pub fn validate_sui_address(address: &str) -> Result<(), Error> {
    if address.starts_with("0x")
        && address.len() == 66
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
    {
        Ok(())
    } else {
        Err(Error::BadRequest("Invalid Sui address".to_string()))
    }
}
