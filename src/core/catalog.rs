//! Platform homepages and parse-service endpoints

use super::models::{AppError, AppResult, ParseApi, Platform};

const BUILTIN_PLATFORMS: [(&str, &str); 12] = [
    ("腾讯视频", "https://v.qq.com/"),
    ("优酷视频", "https://www.youku.com/"),
    ("爱奇艺", "https://www.iqiyi.com/"),
    ("哔哩哔哩", "https://www.bilibili.com/"),
    ("芒果TV", "https://www.mgtv.com/"),
    ("乐视视频", "https://www.le.com/"),
    ("暴风影音", "http://www.baofeng.com/"),
    ("搜狐视频", "https://tv.sohu.com/"),
    ("1905电影", "https://www.1905.com/"),
    ("PPTV", "https://www.pptv.com/"),
    ("风行视频", "http://www.fun.tv/"),
    ("AcFun", "https://www.acfun.cn/"),
];

const BUILTIN_PARSE_APIS: [(&str, &str); 10] = [
    ("①夜幕解析", "https://www.yemu.xyz/?url="),
    ("②8090g", "https://www.8090g.cn/?url="),
    ("③M1907", "https://im1907.top/?jx="),
    ("④PlayerJY", "https://jx.playerjy.com/?url="),
    ("⑤虾米", "https://jx.xmflv.com/?url="),
    ("⑥ckplayer", "https://www.ckplayer.vip/jiexi/?url="),
    ("⑦yparse", "https://jx.yparse.com/index.php?url="),
    ("⑧剖云", "https://www.pouyun.com/?url="),
    ("⑨咸鱼", "https://jx.aidouer.net/?url="),
    ("⑩m3u8", "https://jx.m3u8.tv/jiexi/?url="),
];

/// Immutable lookup tables handed to the command layer
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    platforms: Vec<Platform>,
    parse_apis: Vec<ParseApi>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            platforms: BUILTIN_PLATFORMS
                .iter()
                .map(|(name, url)| Platform {
                    name: name.to_string(),
                    url: url.to_string(),
                })
                .collect(),
            parse_apis: BUILTIN_PARSE_APIS
                .iter()
                .map(|(name, prefix)| ParseApi {
                    name: name.to_string(),
                    prefix: prefix.to_string(),
                })
                .collect(),
        }
    }

    /// Build a catalog from explicit tables; both must be non-empty
    pub fn new(platforms: Vec<Platform>, parse_apis: Vec<ParseApi>) -> AppResult<Self> {
        if platforms.is_empty() {
            return Err(AppError::Config("platform list is empty".to_string()));
        }
        if parse_apis.is_empty() {
            return Err(AppError::Config("parse API list is empty".to_string()));
        }
        Ok(Self {
            platforms,
            parse_apis,
        })
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn parse_apis(&self) -> &[ParseApi] {
        &self.parse_apis
    }

    /// Look up a platform by 1-based index, exact name, or name fragment.
    ///
    /// Numeric keys never match inside a name, only at its start.
    pub fn find_platform(&self, key: &str) -> AppResult<&Platform> {
        find_entry(&self.platforms, key, |p| p.name.as_str())
            .ok_or_else(|| AppError::UnknownPlatform(key.to_string()))
    }

    /// Look up a parse API by 1-based index, exact name, or name fragment
    pub fn find_api(&self, key: &str) -> AppResult<&ParseApi> {
        find_entry(&self.parse_apis, key, |a| a.name.as_str())
            .ok_or_else(|| AppError::UnknownApi(key.to_string()))
    }
}

fn find_entry<'a, T>(entries: &'a [T], key: &str, name: impl Fn(&T) -> &str) -> Option<&'a T> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let exact = entries.iter().find(|e| name(e).trim() == key);

    // 数字只按序号或名称前缀匹配，避免 "0" 命中 "8090g"
    if let Ok(index) = key.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .or(exact)
            .or_else(|| entries.iter().find(|e| name(e).trim().starts_with(key)));
    }

    let lowered = key.to_lowercase();
    exact.or_else(|| {
        entries
            .iter()
            .find(|e| name(e).to_lowercase().contains(&lowered))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.platforms().len(), 12);
        assert_eq!(catalog.parse_apis().len(), 10);
        assert_eq!(catalog.platforms()[0].url, "https://v.qq.com/");
        assert_eq!(catalog.parse_apis()[2].prefix, "https://im1907.top/?jx=");
    }

    #[test]
    fn test_find_by_index_and_name() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.find_api("1").unwrap().name, "①夜幕解析");
        assert_eq!(catalog.find_api("ckplayer").unwrap().name, "⑥ckplayer");
        assert_eq!(catalog.find_api("M1907").unwrap().name, "③M1907");
        assert_eq!(catalog.find_platform("哔哩哔哩").unwrap().url, "https://www.bilibili.com/");
        assert_eq!(catalog.find_platform("acfun").unwrap().name, "AcFun");
        // 数字名称的平台按序号优先
        assert_eq!(catalog.find_platform("10").unwrap().name, "PPTV");
    }

    #[test]
    fn test_unknown_entries() {
        let catalog = Catalog::builtin();
        assert!(matches!(catalog.find_api("0"), Err(AppError::UnknownApi(_))));
        assert!(matches!(catalog.find_api("90"), Err(AppError::UnknownApi(_))));
        assert!(matches!(catalog.find_api("19"), Err(AppError::UnknownApi(_))));
        assert!(matches!(catalog.find_api("99"), Err(AppError::UnknownApi(_))));
        assert!(matches!(catalog.find_api(""), Err(AppError::UnknownApi(_))));
        assert!(matches!(
            catalog.find_platform("youtube"),
            Err(AppError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn test_name_fragment_falls_back_after_bad_index() {
        let catalog = Catalog::builtin();
        // "1905" 不是有效序号，按名称匹配
        assert_eq!(catalog.find_platform("1905").unwrap().name, "1905电影");
        assert_eq!(catalog.find_platform("19").unwrap().name, "1905电影");
        assert!(matches!(
            catalog.find_platform("905"),
            Err(AppError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn test_empty_tables_rejected() {
        assert!(Catalog::new(Vec::new(), Catalog::builtin().parse_apis().to_vec()).is_err());
        assert!(Catalog::new(Catalog::builtin().platforms().to_vec(), Vec::new()).is_err());
    }
}
