//! Application-level configuration constants.

// UI Behavior
pub const REPORT_PAGE: &str = "report.html";

// Audio cue volumes
pub const SCAN_AUDIO_VOLUME: f64 = 0.3;
pub const ALERT_AUDIO_VOLUME: f64 = 0.5;

// Default values for the settings sliders
pub const DEFAULT_SENSITIVITY_PCT: u32 = 50;
pub const DEFAULT_OPACITY_PCT: u32 = 70;

// Status line copy
pub const STATUS_AIM_CAMERA: &str = "وجّه الكاميرا واضغط لبدء المسح";
pub const STATUS_UPLOAD_PROMPT: &str = "ارفع صورة لبدء التحليل";
pub const STATUS_IMAGE_READY: &str = "الصورة جاهزة للتحليل. اضغط لبدء المسح.";
pub const STATUS_ANALYZING: &str = "يتم تحليل البيانات...";
pub const STATUS_COMPLETE: &str = "اكتمل المسح! التقرير الكامل جاهز للعرض.";
pub const STATUS_AWAITING_SCAN: &str = "في انتظار المسح...";

// Button labels and titles
pub const SCAN_BUTTON_IDLE: &str = "ابدأ المسح";
pub const SCAN_BUTTON_ACTIVE: &str = "جاري المسح...";
pub const REPORT_BUTTON_LABEL: &str = "عرض التقرير";
pub const TOGGLE_TO_UPLOAD_TITLE: &str = "التبديل إلى وضع رفع الصور";
pub const TOGGLE_TO_CAMERA_TITLE: &str = "التبديل إلى وضع الكاميرا الحية";

// Section headings
pub const METALS_HEADING: &str = "معادن ثمينة";
pub const GEMSTONES_HEADING: &str = "أحجار كريمة";
pub const METEORITES_HEADING: &str = "مؤشرات نيزكية";
pub const SETTINGS_HEADING: &str = "الإعدادات";
pub const SENSITIVITY_LABEL: &str = "حساسية المسح:";
pub const OPACITY_LABEL: &str = "شفافية الواجهة:";
pub const SAVE_SETTINGS_LABEL: &str = "حفظ";
