use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::IdTokenClaims;

/// Decode the identity token's claims without verifying its signature.
///
/// The token arrives over the TLS channel of the token-endpoint response,
/// and this application performs no independent cryptographic verification
/// of provider-issued JWTs. Claims are extracted for persistence only.
pub fn decode_id_token(id_token: &str) -> Result<IdTokenClaims, OAuth2Error> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<IdTokenClaims>(
        id_token,
        &DecodingKey::from_secret(&[]),
        &validation,
    )
    .map_err(|e| OAuth2Error::IdToken(e.to_string()))?;

    Ok(data.claims)
}
