use chrono::{Duration, Utc};

use iothub_auth::error::AuthServiceError;
use iothub_auth::usecase::otp::{ResendOtpInput, ResendOtpUseCase, validate_and_consume};
use iothub_auth::usecase::password::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
    verify_password,
};

use crate::helpers::{MockMailer, MockOtpRepo, MockUserRepo, test_challenge, test_user};

#[tokio::test]
async fn should_keep_a_single_pending_challenge_per_user() {
    let user = test_user();

    let otps = MockOtpRepo::empty();
    let slots_handle = otps.slots_handle();
    let mailer = MockMailer::new();

    let uc = ResendOtpUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        otps,
        mailer,
    };

    for _ in 0..3 {
        uc.execute(ResendOtpInput {
            email: user.email.clone(),
        })
        .await
        .unwrap();
    }

    let slots = slots_handle.lock().unwrap();
    assert_eq!(slots.len(), 1, "re-issuing must not accumulate challenges");
    assert_eq!(slots[0].generation, 3, "each re-issue bumps the generation");
}

#[tokio::test]
async fn should_reject_superseded_code_after_reissue() {
    let user = test_user();

    let otps = MockOtpRepo::empty();
    let slots_handle = otps.slots_handle();
    let mailer = MockMailer::new();
    let deliveries_handle = mailer.deliveries_handle();

    let uc = ResendOtpUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        otps,
        mailer,
    };

    uc.execute(ResendOtpInput {
        email: user.email.clone(),
    })
    .await
    .unwrap();
    let first_code = deliveries_handle.lock().unwrap()[0].code.clone();

    uc.execute(ResendOtpInput {
        email: user.email.clone(),
    })
    .await
    .unwrap();
    let second_code = deliveries_handle.lock().unwrap()[1].code.clone();

    let otps = MockOtpRepo::new(slots_handle.lock().unwrap().clone());

    // Codes are random six-digit strings; skip the superseded check on the
    // rare collision where both issuances drew the same digits.
    if first_code != second_code {
        let result = validate_and_consume(&otps, user.id, &first_code).await;
        assert!(
            matches!(result, Err(AuthServiceError::InvalidOtp)),
            "expected InvalidOtp for superseded code, got {result:?}"
        );
    }

    validate_and_consume(&otps, user.id, &second_code)
        .await
        .expect("newest code should validate");
}

#[tokio::test]
async fn should_consume_code_exactly_once() {
    let user = test_user();
    let challenge = test_challenge(user.id);
    let otps = MockOtpRepo::new(vec![challenge.clone()]);

    validate_and_consume(&otps, user.id, &challenge.code)
        .await
        .expect("first submission should succeed");

    let replay = validate_and_consume(&otps, user.id, &challenge.code).await;
    assert!(
        matches!(replay, Err(AuthServiceError::InvalidOtp)),
        "expected InvalidOtp on replay, got {replay:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_code() {
    let user = test_user();
    let mut challenge = test_challenge(user.id);
    challenge.expires_at = Utc::now() - Duration::seconds(1);
    let otps = MockOtpRepo::new(vec![challenge.clone()]);

    let result = validate_and_consume(&otps, user.id, &challenge.code).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidOtp)),
        "expected InvalidOtp for expired code, got {result:?}"
    );

    // Expired challenge stays in the slot until replaced or consumed by a
    // matching generation; it can never validate again either way.
    let slots = otps.slots_handle();
    assert_eq!(slots.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_wrong_code_without_consuming_slot() {
    let user = test_user();
    let challenge = test_challenge(user.id);
    let otps = MockOtpRepo::new(vec![challenge.clone()]);
    let slots_handle = otps.slots_handle();

    let result = validate_and_consume(&otps, user.id, "000000").await;
    assert!(matches!(result, Err(AuthServiceError::InvalidOtp)));

    assert_eq!(
        slots_handle.lock().unwrap().len(),
        1,
        "wrong guess must not burn the pending challenge"
    );

    validate_and_consume(&otps, user.id, &challenge.code)
        .await
        .expect("correct code should still work after a wrong guess");
}

#[tokio::test]
async fn should_propagate_delivery_failure_after_persisting_challenge() {
    let user = test_user();

    let otps = MockOtpRepo::empty();
    let slots_handle = otps.slots_handle();

    let uc = ForgotPasswordUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        otps,
        mailer: MockMailer::failing(),
    };

    let result = uc
        .execute(ForgotPasswordInput {
            email: user.email.clone(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::DeliveryFailed)),
        "expected DeliveryFailed, got {result:?}"
    );
    assert_eq!(
        slots_handle.lock().unwrap().len(),
        1,
        "challenge should already be persisted when delivery fails"
    );
}

#[tokio::test]
async fn should_reset_password_with_valid_code() {
    let user = test_user();
    let challenge = test_challenge(user.id);

    let users = MockUserRepo::new(vec![user.clone()]);
    let users_handle = users.users_handle();

    let uc = ResetPasswordUseCase {
        users,
        otps: MockOtpRepo::new(vec![challenge.clone()]),
    };

    uc.execute(ResetPasswordInput {
        email: user.email.clone(),
        code: challenge.code.clone(),
        new_password: "brand-new-password".to_owned(),
    })
    .await
    .unwrap();

    let users = users_handle.lock().unwrap();
    assert!(verify_password("brand-new-password", &users[0].password_hash));
}

#[tokio::test]
async fn should_reject_short_password_on_reset_before_touching_code() {
    let user = test_user();
    let challenge = test_challenge(user.id);
    let otps = MockOtpRepo::new(vec![challenge.clone()]);
    let slots_handle = otps.slots_handle();

    let uc = ResetPasswordUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        otps,
    };

    let result = uc
        .execute(ResetPasswordInput {
            email: user.email.clone(),
            code: challenge.code.clone(),
            new_password: "short".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(AuthServiceError::InvalidPassword)));
    assert_eq!(
        slots_handle.lock().unwrap().len(),
        1,
        "rejected password must not consume the challenge"
    );
}

#[tokio::test]
async fn should_return_not_found_when_resending_to_unknown_email() {
    let uc = ResendOtpUseCase {
        users: MockUserRepo::empty(),
        otps: MockOtpRepo::empty(),
        mailer: MockMailer::new(),
    };

    let result = uc
        .execute(ResendOtpInput {
            email: "nobody@example.com".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
