//! Permission tokens and the tables that map them to grant sources.

/// Withdrawal, cash-in and remark screens.
pub const VIEW_WITHDRAWAL: &str = "view_withdrawal";
pub const EDIT_WITHDRAWAL: &str = "edit_withdrawal";
pub const VIEW_CASH_IN: &str = "view_cash_in";
pub const EDIT_CASH_IN: &str = "edit_cash_in";
pub const VIEW_REMARK: &str = "view_remark";
pub const EDIT_REMARK: &str = "edit_remark";

pub const VIEW_PS_POLISH: &str = "view_ps_polish";
pub const EDIT_PS_POLISH: &str = "edit_ps_polish";

pub const VIEW_CARD_BIND: &str = "view_card_bind";
pub const EDIT_CARD_BIND: &str = "edit_card_bind";
pub const VIEW_CARD_CONSUME: &str = "view_card_consume";
pub const EDIT_CARD_CONSUME: &str = "edit_card_consume";

pub const VIEW_WEEKEND_PLAN: &str = "view_weekend_plan";
pub const EDIT_WEEKEND_PLAN: &str = "edit_weekend_plan";

pub const VIEW_WARNING_OVERVIEW: &str = "view_warning_overview";
pub const EDIT_WARNING_OVERVIEW: &str = "edit_warning_overview";

pub const VIEW_WEEKEND_SPECIAL_DATE: &str = "view_weekend_special_date";
pub const EDIT_WEEKEND_SPECIAL_DATE: &str = "edit_weekend_special_date";

pub const FREE_SEARCH: &str = "view_free_search";
/// Direct right that unlocks [`FREE_SEARCH`].
pub const TOOL_USER_RIGHT: &str = "tool_user";

pub const VIEW_SELF_SIGNUP_CLASSES: &str = "view_self_signup_classes";
pub const EDIT_SELF_SIGNUP_CLASSES: &str = "edit_self_signup_classes";
pub const SELF_SIGNUP_CLASSES: &[&str] = &[VIEW_SELF_SIGNUP_CLASSES, EDIT_SELF_SIGNUP_CLASSES];
/// Direct rights that unlock the self-signup class screens.
pub const SELF_SIGNUP_GRANTING_RIGHTS: &[&str] = &["edit_classes", "sales_admin"];

/// Granted to every authenticated staff user.
pub const BASIC_PERMISSIONS: &[&str] = &[
    "view_subject_evaluate",
    "edit_subject_evaluate",
    "view_exit_permit",
    "edit_exit_permit",
    "view_graduation_wishes",
    "edit_graduation_wishes",
    "view_transcript_apply",
    "edit_transcript_apply",
    "view_my_card",
    "edit_my_card",
    "view_my_subjects",
    "edit_my_subjects",
    "view_profile",
    "edit_profile",
];

/// Operational areas gated by a category code in `operation_right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationCategory {
    WithdrawalManagement,
    PsPolish,
    CardManagement,
    WeekendPlan,
    WarningManagement,
    WeekendSpecialDate,
}

impl OperationCategory {
    pub const ALL: [OperationCategory; 6] = [
        OperationCategory::WithdrawalManagement,
        OperationCategory::PsPolish,
        OperationCategory::CardManagement,
        OperationCategory::WeekendPlan,
        OperationCategory::WarningManagement,
        OperationCategory::WeekendSpecialDate,
    ];

    /// Code the user's `operation_right` must contain.
    pub fn required_code(self) -> &'static str {
        match self {
            OperationCategory::WithdrawalManagement => "11",
            OperationCategory::PsPolish => "12",
            OperationCategory::CardManagement => "13",
            OperationCategory::WeekendPlan => "14",
            OperationCategory::WarningManagement => "15",
            OperationCategory::WeekendSpecialDate => "16",
        }
    }

    /// Tokens that belong to this category.
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            OperationCategory::WithdrawalManagement => &[
                VIEW_WITHDRAWAL,
                EDIT_WITHDRAWAL,
                VIEW_CASH_IN,
                EDIT_CASH_IN,
                VIEW_REMARK,
                EDIT_REMARK,
            ],
            OperationCategory::PsPolish => &[VIEW_PS_POLISH, EDIT_PS_POLISH],
            OperationCategory::CardManagement => &[
                VIEW_CARD_BIND,
                EDIT_CARD_BIND,
                VIEW_CARD_CONSUME,
                EDIT_CARD_CONSUME,
            ],
            OperationCategory::WeekendPlan => &[VIEW_WEEKEND_PLAN, EDIT_WEEKEND_PLAN],
            OperationCategory::WarningManagement => &[VIEW_WARNING_OVERVIEW, EDIT_WARNING_OVERVIEW],
            OperationCategory::WeekendSpecialDate => {
                &[VIEW_WEEKEND_SPECIAL_DATE, EDIT_WEEKEND_SPECIAL_DATE]
            }
        }
    }
}

/// Category gating a token, if any.
pub fn operation_category(token: &str) -> Option<OperationCategory> {
    OperationCategory::ALL
        .into_iter()
        .find(|category| category.tokens().contains(&token))
}

pub fn is_basic_permission(token: &str) -> bool {
    BASIC_PERMISSIONS.contains(&token)
}

pub fn is_self_signup_token(token: &str) -> bool {
    SELF_SIGNUP_CLASSES.contains(&token)
}

/// Every token this catalog knows about, in a stable order.
pub fn known_tokens() -> impl Iterator<Item = &'static str> {
    OperationCategory::ALL
        .into_iter()
        .flat_map(|category| category.tokens().iter().copied())
        .chain(std::iter::once(FREE_SEARCH))
        .chain(SELF_SIGNUP_CLASSES.iter().copied())
        .chain(BASIC_PERMISSIONS.iter().copied())
}
