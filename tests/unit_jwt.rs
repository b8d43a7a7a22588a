use shule::shule_auth::{create_access_token, verify_token};
use shule::shule_config::JwtConfig;
use shule::shule_core::{AuthContext, Role};

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_for_every_signed_in_role() {
    let jwt_config = get_test_jwt_config();

    for role in [Role::Parent, Role::Secretary, Role::Headmaster] {
        let token = create_access_token("subject", role, &jwt_config).unwrap();
        assert!(!token.is_empty());
    }
}

#[test]
fn test_no_token_for_anonymous() {
    let jwt_config = get_test_jwt_config();
    let err = create_access_token("nobody", Role::Anonymous, &jwt_config).unwrap_err();
    assert_eq!(err.status.as_u16(), 500);
}

#[test]
fn test_verify_token_round_trips_claims() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token("24PL003", Role::Parent, &jwt_config).unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, "24PL003");
    assert_eq!(claims.role, Role::Parent);
    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(
        claims.auth_context(),
        AuthContext::new(Role::Parent, "24PL003")
    );
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token("1", Role::Secretary, &jwt_config).unwrap();

    let other = JwtConfig {
        secret: "different_secret".to_string(),
        access_token_expiry: 3600,
    };
    let err = verify_token(&token, &other).unwrap_err();
    assert_eq!(err.status.as_u16(), 401);
}

#[test]
fn test_verify_token_garbage() {
    let jwt_config = get_test_jwt_config();

    for token in ["", "invalid", "a.b.c"] {
        assert!(verify_token(token, &jwt_config).is_err(), "{token:?}");
    }
}
