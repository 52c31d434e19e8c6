//! Wire types for the auth API
//!
//! Request and response envelopes match the backend's JSON contract exactly;
//! field names are camelCase on the wire and optional request fields are
//! omitted when absent.

use serde::{Deserialize, Serialize};

/// Identity record returned by every successful auth exchange.
///
/// Replaced wholesale on each auth response or session refresh; no component
/// other than the session controller retains a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque stable identifier
    pub id: String,
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Premium entitlement flag
    pub is_premium: bool,
}

/// Success envelope for register/login/federated-login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Server status message
    pub message: String,
    /// Bearer token for subsequent requests
    pub token: String,
    /// The authenticated user
    pub user: User,
}

/// Success envelope for the current-user lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The authenticated user
    pub user: User,
}

/// Error envelope for any non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Server-supplied error message
    pub error: String,
}

/// Request body for `/auth/register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Plaintext password (sent over TLS only)
    pub password: String,
}

/// Request body for `/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plaintext password (sent over TLS only)
    pub password: String,
}

/// Request body for `/auth/google`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    /// Google account identifier
    pub google_id: String,
    /// Email address
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Avatar URL, when the provider supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Request body for `/auth/apple`
///
/// Apple only discloses email and name on the very first authorization, so
/// both are optional.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleLoginRequest {
    /// Apple account identifier
    pub apple_id: String,
    /// Email address, first authorization only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, first authorization only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_names_are_camel_case() {
        let json = r#"{"id":"u1","fullName":"Ana","email":"a@b.com","isPremium":true}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.full_name, "Ana");
        assert!(user.is_premium);

        let out = serde_json::to_string(&user).unwrap();
        assert!(out.contains("\"fullName\""));
        assert!(out.contains("\"isPremium\""));
    }

    #[test]
    fn test_auth_response_decode() {
        let json = r#"{
            "message": "ok",
            "token": "tok123",
            "user": {"id":"u1","fullName":"A","email":"a@b.com","isPremium":false}
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "tok123");
        assert_eq!(response.user.id, "u1");
    }

    #[test]
    fn test_google_request_omits_absent_picture() {
        let request = GoogleLoginRequest {
            google_id: "g1".to_string(),
            email: "a@b.com".to_string(),
            full_name: "A".to_string(),
            profile_picture: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"googleId\""));
        assert!(!json.contains("profilePicture"));
    }

    #[test]
    fn test_apple_request_omits_absent_fields() {
        let request = AppleLoginRequest {
            apple_id: "ap1".to_string(),
            email: None,
            full_name: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"appleId":"ap1"}"#);
    }
}
