use crate::membership::error::MembershipError;
use crate::membership::error::MembershipError::MissingBankDetails;
use crate::tools::env_args::retrieve_expected_arg_value;
use dto::payment_info::BankDetails;

const ACCOUNT_HOLDER_ARG: &str = "--account-holder";
const IBAN_ARG: &str = "--iban";
const BIC_ARG: &str = "--bic";

/// Bank details displayed to members so that they can pay by transfer.
pub fn retrieve_bank_details() -> Result<BankDetails, MembershipError> {
    let account_holder =
        retrieve_expected_arg_value(ACCOUNT_HOLDER_ARG, MissingBankDetails(ACCOUNT_HOLDER_ARG))?;
    let iban = retrieve_expected_arg_value(IBAN_ARG, MissingBankDetails(IBAN_ARG))?;
    let bic = retrieve_expected_arg_value(BIC_ARG, MissingBankDetails(BIC_ARG))?;

    Ok(BankDetails::new(
        account_holder,
        iban.split_whitespace().collect(),
        bic.trim().to_owned(),
    ))
}
