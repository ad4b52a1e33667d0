use helper::*;

use scrypto_test::prelude::*;

#[test]
fn test_controller_is_allowed() -> Result<(), RuntimeError> {
    let mut helper = Helper::new().unwrap();
    let controller_address = helper.controller_address();
    let ledger_address = helper.reward_ledger_address();

    assert!(helper.is_allowed(controller_address)?);
    assert!(!helper.is_allowed(ledger_address)?);

    let reward_address = helper
        .reward_ledger
        .get_reward_address(&mut helper.env)?;
    assert_eq!(reward_address, helper.gold_address);
    assert_eq!(helper.get_total_credited()?, dec!(0));

    Ok(())
}

#[test]
fn test_remove_allowed() -> Result<(), RuntimeError> {
    let mut helper = Helper::new().unwrap();
    let controller_address = helper.controller_address();

    helper.remove_allowed(controller_address)?;
    assert!(!helper.is_allowed(controller_address)?);

    helper.add_allowed(controller_address)?;
    assert!(helper.is_allowed(controller_address)?);

    Ok(())
}

#[test]
fn test_credit_unknown_caller() -> Result<(), RuntimeError> {
    let mut helper = Helper::new().unwrap();
    let ledger_address = helper.reward_ledger_address();

    let failure = helper.credit(ledger_address, dec!(100));

    let Err(error) = failure else {
        panic!("Expected crediting an unknown caller to fail");
    };
    assert!(format!("{:?}", error).contains("Caller is not allowed to credit rewards."));
    assert_eq!(helper.get_total_credited()?, dec!(0));

    Ok(())
}

#[test]
fn test_credit_impersonating_allowed_caller() -> Result<(), RuntimeError> {
    let mut helper = Helper::new().unwrap();
    let controller_address = helper.controller_address();

    // The controller is allowed, but this call does not come from the controller
    let failure = helper.credit(controller_address, dec!(100));

    assert!(failure.is_err());
    assert_eq!(helper.get_total_credited()?, dec!(0));

    Ok(())
}

#[test]
fn test_total_credited_follows_completions() -> Result<(), RuntimeError> {
    let mut helper = Helper::new().unwrap();

    helper.start_expeditions(vec![0, 1])?;
    helper.advance_time(EXPEDITION_DURATION);
    let _first = helper.complete_expeditions(vec![0])?;
    let _second = helper.complete_expeditions(vec![1])?;

    assert_eq!(helper.get_total_credited()?, dec!(200));

    Ok(())
}
