//! Re-usable prompt skeletons and fixed user-facing strings.

/// Shown whenever a request fails; the real error stays in `ChatResponse::error`.
pub const APOLOGY: &str =
    "Xin lỗi, đã có lỗi xảy ra khi xử lý yêu cầu của bạn. Vui lòng thử lại.";

/// Shown for blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Vui lòng nhập câu hỏi của bạn.";

/// Prefixed to formatted data when the rendering call fails in degraded mode.
pub const DEGRADED_PREFACE: &str = "Dạ, đây là thông tin bạn yêu cầu:";

/// Opens the canned out-of-scope reply used in degraded mode.
pub const OUT_OF_SCOPE_FALLBACK: &str =
    "Xin lỗi, tôi chưa thể hỗ trợ câu hỏi này. Tôi có thể giúp bạn về:";

pub const WELCOME: &str = "Xin chào! Tôi là trợ lý ảo của nhà hàng. Tôi có thể giúp bạn về:";

/// Intent catalogue for the classifier: name, meaning, parameters, example.
pub const INTENT_CATALOGUE: &[(&str, &str, &str, &str)] = &[
    (
        "GetMenu",
        "hỏi về thực đơn, món ăn, giá cả",
        "categoryId (số), keyword (tên món)",
        "Thực đơn hôm nay có gì?",
    ),
    (
        "GetTableAvailability",
        "hỏi về bàn trống, tình trạng bàn",
        "status (Empty|Using|Booked|Maintenance), areaId (số)",
        "Còn bàn trống không?",
    ),
    (
        "GetTotalBookings",
        "hỏi về tổng số lượt đặt bàn",
        "không có",
        "Hôm nay có bao nhiêu lượt đặt bàn?",
    ),
    (
        "GetPopularDishes",
        "hỏi về món bán chạy, món hot",
        "topCount (số), categoryId (số)",
        "Top 5 món bán chạy nhất?",
    ),
    (
        "GetTableRevenue",
        "hỏi tổng bill hoặc doanh thu của một bàn",
        "tableName (VD: A01, VIP1), startDate, endDate (dd/MM/yyyy)",
        "Bàn A01 bill bao nhiêu?",
    ),
    (
        "GetDailyRevenue",
        "hỏi doanh thu theo ngày",
        "date (dd/MM/yyyy, today, yesterday)",
        "Doanh thu hôm nay bao nhiêu?",
    ),
    (
        "GetPeakHours",
        "hỏi giờ đông khách, giờ cao điểm",
        "startDate, endDate (dd/MM/yyyy)",
        "Giờ nào đông khách nhất?",
    ),
    (
        "GetTableRevenueRanking",
        "hỏi bàn có doanh thu cao nhất hoặc thấp nhất",
        "type (highest|lowest), topCount (số), startDate, endDate",
        "Top 3 bàn doanh thu thấp nhất?",
    ),
    (
        "Unknown",
        "câu hỏi ngoài phạm vi, không liên quan",
        "không có",
        "Thời tiết hôm nay thế nào?",
    ),
];

pub fn classification_system() -> &'static str {
    "# Phân tích Intent cho Chatbot Nhà hàng"
}

pub fn classification_output_format() -> &'static str {
    "```json\n{\n  \"intent\": \"IntentName\",\n  \"parameters\": {},\n  \"confidence\": 0.95\n}\n```"
}

pub fn classification_closing() -> &'static str {
    "**CHỈ TRẢ VỀ JSON, KHÔNG THÊM TEXT GIẢI THÍCH.**"
}

pub fn assistant_system() -> &'static str {
    "# Trợ lý Ảo Nhà hàng\n\nBạn là trợ lý ảo thân thiện, chuyên nghiệp của nhà hàng. Nói tiếng Việt lịch sự, dùng \"dạ/ạ\" phù hợp."
}

pub fn render_requirements() -> Vec<String> {
    vec![
        "Trả lời câu hỏi dựa trên dữ liệu trên".into(),
        "Dùng tiếng Việt thân thiện, tự nhiên".into(),
        "Giữ nguyên format và emoji từ dữ liệu".into(),
        "Ngắn gọn, dễ hiểu".into(),
        "Kết thúc bằng câu hỏi để tiếp tục hỗ trợ".into(),
    ]
}

pub fn render_closing() -> &'static str {
    "**CHỈ TRẢ VỀ CÂU TRẢ LỜI, KHÔNG THÊM META TEXT.**"
}

pub fn out_of_scope_requirements(topics: &[String]) -> Vec<String> {
    vec![
        "Xin lỗi lịch sự".into(),
        format!("Giải thích bạn chỉ có thể hỗ trợ về: {}", topics.join(", ")),
        "Mời khách hỏi lại về các chủ đề trên".into(),
    ]
}

pub fn greeting_requirements(topics: &[String]) -> Vec<String> {
    vec![
        "Chào lại khách thân thiện".into(),
        format!("Giới thiệu ngắn gọn bạn có thể hỗ trợ về: {}", topics.join(", ")),
        "Mời khách đặt câu hỏi".into(),
    ]
}

/// `preface` followed by one bullet per topic.
pub fn topic_list(preface: &str, topics: &[String]) -> String {
    let mut text = preface.to_string();
    for topic in topics {
        text.push_str(&format!("\n  • {}", topic));
    }
    text
}
